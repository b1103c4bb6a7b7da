// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted configuration produced by the setup flow.

use std::net::Ipv4Addr;

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};

use crate::appliance::{ApplianceAddress, ApplianceRecord};
use crate::error::FlowError;

/// A configured appliance, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Local network address.
    pub ip_address: Ipv4Addr,
    /// Cloud identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Appliance type code.
    #[serde(rename = "type")]
    pub appliance_type: String,
    /// Local control token.
    #[serde(default)]
    pub token: String,
    /// Local control key.
    #[serde(default)]
    pub token_key: String,
}

impl DeviceEntry {
    /// Converts a record with a resolved address.
    ///
    /// Returns `None` for ignored and unresolved records.
    #[must_use]
    pub fn from_record(record: &ApplianceRecord) -> Option<Self> {
        let ApplianceAddress::Resolved(ip_address) = record.address else {
            return None;
        };
        Some(Self {
            ip_address,
            id: record.id.clone(),
            name: record.name.clone(),
            appliance_type: record.appliance_type.clone(),
            token: record.token.clone(),
            token_key: record.key.clone(),
        })
    }
}

/// Configuration persisted for one cloud account.
///
/// Serializes with the stable keys `username`, `password`, `appkey`,
/// `appid`, `network_range` and `devices`.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::config::ConfigurationRecord;
///
/// let json = r#"{
///     "username": "me@example.com",
///     "password": "secret",
///     "appkey": "3742e9e5842d4ad59c2db887e12449f9",
///     "appid": 1017,
///     "devices": [{
///         "ip_address": "192.168.1.20",
///         "id": "1001",
///         "name": "Basement",
///         "type": "0xA1",
///         "token": "",
///         "token_key": ""
///     }]
/// }"#;
///
/// let record: ConfigurationRecord = serde_json::from_str(json).unwrap();
/// assert_eq!(record.devices.len(), 1);
/// assert!(record.network_range.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationRecord {
    /// Cloud account username.
    pub username: String,
    /// Cloud account password.
    pub password: String,
    /// Cloud application key.
    pub appkey: String,
    /// Cloud application id.
    pub appid: u32,
    /// Network range discovery was restricted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_range: Option<String>,
    /// Configured appliances.
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

impl ConfigurationRecord {
    /// Returns the unique key of this configuration.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.username
    }

    /// Parses the stored network range.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::InvalidIpRange` if the stored value no longer
    /// parses.
    pub fn network_ranges(&self) -> Result<Vec<Ipv4Network>, FlowError> {
        self.network_range
            .as_deref()
            .map(parse_network_range)
            .transpose()
            .map(|range| range.into_iter().collect())
    }
}

/// Parses an IPv4 network in CIDR notation.
///
/// Host bits are allowed and masked off, so `192.168.1.77/24` yields
/// `192.168.1.0/24`. A bare address is a `/32` network.
///
/// # Errors
///
/// Returns `FlowError::InvalidIpRange` carrying the input if it does not
/// parse.
pub fn parse_network_range(value: &str) -> Result<Ipv4Network, FlowError> {
    let trimmed = value.trim();
    let network: Ipv4Network = trimmed
        .parse()
        .map_err(|_| FlowError::InvalidIpRange(value.to_string()))?;
    Ipv4Network::new(network.network(), network.prefix())
        .map_err(|_| FlowError::InvalidIpRange(value.to_string()))
}
