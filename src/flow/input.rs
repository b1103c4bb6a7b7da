// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed step submissions.
//!
//! Field names match the form field identifiers, so a host dictionary
//! deserializes directly into these types. Empty strings count as absent.

use serde::{Deserialize, Serialize};

/// Submission of the `user` step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    /// Account username.
    #[serde(default)]
    pub username: Option<String>,
    /// Account password.
    #[serde(default)]
    pub password: Option<String>,
    /// Mobile app profile name.
    #[serde(default)]
    pub mobile_app: Option<String>,
    /// Continue to the advanced options step.
    #[serde(default)]
    pub advanced_options: bool,
}

impl UserInput {
    /// Creates a submission with account credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Selects a mobile app profile.
    #[must_use]
    pub fn with_mobile_app(mut self, app: impl Into<String>) -> Self {
        self.mobile_app = Some(app.into());
        self
    }

    /// Requests the advanced options step.
    #[must_use]
    pub fn with_advanced_options(mut self) -> Self {
        self.advanced_options = true;
        self
    }
}

/// Submission of the `advanced_options` step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedOptionsInput {
    /// Account username override.
    #[serde(default)]
    pub username: Option<String>,
    /// Account password override.
    #[serde(default)]
    pub password: Option<String>,
    /// Cloud application key.
    #[serde(default)]
    pub appkey: Option<String>,
    /// Cloud application id.
    #[serde(default)]
    pub appid: Option<u32>,
    /// IPv4 network to restrict discovery to.
    #[serde(default)]
    pub network_range: Option<String>,
}

/// Submission of the `unreachable_appliance` step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreachableApplianceInput {
    /// Skip this appliance.
    #[serde(default)]
    pub ignore_appliance: bool,
    /// Local address of the appliance.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Local control token.
    #[serde(default)]
    pub token: Option<String>,
    /// Local control key.
    #[serde(default)]
    pub token_key: Option<String>,
}

impl UnreachableApplianceInput {
    /// Submission configuring the appliance at `ip_address`.
    #[must_use]
    pub fn address(ip_address: impl Into<String>) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
            ..Self::default()
        }
    }

    /// Submission skipping the appliance.
    #[must_use]
    pub fn ignore() -> Self {
        Self {
            ignore_appliance: true,
            ip_address: Some(String::new()),
            ..Self::default()
        }
    }

    /// Sets the local control credentials.
    #[must_use]
    pub fn with_credentials(mut self, token: impl Into<String>, token_key: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self.token_key = Some(token_key.into());
        self
    }
}

/// Returns the trimmed value if it is present and not blank.
pub(crate) fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}
