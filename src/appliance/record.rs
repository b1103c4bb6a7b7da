// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance records collected during setup.

use std::fmt;
use std::net::Ipv4Addr;

use crate::config::IGNORED_IP_ADDRESS;
use crate::state::ApplianceState;

/// Type code of Midea dehumidifiers.
pub const DEHUMIDIFIER_TYPE: &str = "0xA1";

/// Local network address of an appliance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApplianceAddress {
    /// No address is known yet.
    #[default]
    Unresolved,
    /// The user chose not to configure this appliance.
    Ignored,
    /// The appliance answers at this address.
    Resolved(Ipv4Addr),
}

impl ApplianceAddress {
    /// Returns `true` if the address still needs to be provided.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// Returns `true` if the appliance is ignored.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// Returns the address if it is resolved.
    #[must_use]
    pub fn ip(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Resolved(ip) => Some(*ip),
            Self::Unresolved | Self::Ignored => None,
        }
    }
}

impl From<Ipv4Addr> for ApplianceAddress {
    fn from(ip: Ipv4Addr) -> Self {
        if ip.is_unspecified() {
            Self::Ignored
        } else {
            Self::Resolved(ip)
        }
    }
}

impl fmt::Display for ApplianceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => Ok(()),
            Self::Ignored => f.write_str(IGNORED_IP_ADDRESS),
            Self::Resolved(ip) => write!(f, "{ip}"),
        }
    }
}

/// An appliance registered in the cloud account.
///
/// Records come from the cloud inventory and are completed by the user for
/// appliances that discovery could not reach.
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use midea_dehumidifier_lan::appliance::ApplianceRecord;
///
/// let found = ApplianceRecord::new("1001", "Basement", "0xA1")
///     .with_address(Ipv4Addr::new(192, 168, 1, 20));
/// assert!(!found.address.is_unresolved());
///
/// let missing = ApplianceRecord::new("1002", "Attic", "0xA1");
/// assert!(missing.address.is_unresolved());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplianceRecord {
    /// Identifier from the cloud inventory.
    pub id: String,
    /// Local network address.
    pub address: ApplianceAddress,
    /// Display name.
    pub name: String,
    /// Appliance type code, e.g. `0xA1` for dehumidifiers.
    pub appliance_type: String,
    /// Token used for local control.
    pub token: String,
    /// Key used for local control.
    pub key: String,
    /// State reported by the last probe.
    pub state: Option<ApplianceState>,
}

impl ApplianceRecord {
    /// Creates an unresolved record.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        appliance_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            address: ApplianceAddress::Unresolved,
            name: name.into(),
            appliance_type: appliance_type.into(),
            token: String::new(),
            key: String::new(),
            state: None,
        }
    }

    /// Sets the local address.
    #[must_use]
    pub fn with_address(mut self, ip: Ipv4Addr) -> Self {
        self.address = ip.into();
        self
    }

    /// Sets the local control credentials.
    #[must_use]
    pub fn with_credentials(mut self, token: impl Into<String>, key: impl Into<String>) -> Self {
        self.token = token.into();
        self.key = key.into();
        self
    }

    /// Sets the reported state.
    #[must_use]
    pub fn with_state(mut self, state: ApplianceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Returns `true` if this appliance is a dehumidifier.
    #[must_use]
    pub fn is_dehumidifier(&self) -> bool {
        is_dehumidifier_type(&self.appliance_type)
    }

    /// Merges a probe report into the record.
    pub fn merge_probe(&mut self, report: &ApplianceState) {
        match &mut self.state {
            Some(state) => state.merge(report),
            None => self.state = Some(report.clone()),
        }
    }
}

/// Returns `true` if the type code designates a dehumidifier.
///
/// Accepts `0xA1`, `a1` and `161` in any letter case.
#[must_use]
pub fn is_dehumidifier_type(code: &str) -> bool {
    let code = code.trim();
    let hex = code
        .strip_prefix("0x")
        .or_else(|| code.strip_prefix("0X"))
        .unwrap_or(code);
    hex.eq_ignore_ascii_case("a1") || code == "161"
}
