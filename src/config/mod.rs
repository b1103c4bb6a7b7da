// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration constants, flow options and the persisted configuration
//! record.
//!
//! The key names below are part of the persisted format and of the form
//! field identifiers; changing them breaks existing entries.

mod options;
mod record;

pub use options::FlowOptions;
pub use record::{ConfigurationRecord, DeviceEntry, parse_network_range};

/// Integration domain.
pub const DOMAIN: &str = "midea_dehumidifier_lan";

/// Human readable integration name.
pub const NAME: &str = "Midea Dehumidifier (LAN)";

/// Title given to created configuration entries.
pub const ENTRY_TITLE: &str = "Midea Dehumidifiers";

/// Address marking an appliance the user chose to ignore.
pub const IGNORED_IP_ADDRESS: &str = "0.0.0.0";

/// Username prefilled in the credentials form.
pub const DEFAULT_USERNAME: &str = "your.account@example.com";

/// Password prefilled in the credentials form.
pub const DEFAULT_PASSWORD: &str = "password";

pub const CONF_USERNAME: &str = "username";
pub const CONF_PASSWORD: &str = "password";
pub const CONF_APPKEY: &str = "appkey";
pub const CONF_APPID: &str = "appid";
pub const CONF_MOBILE_APP: &str = "mobile_app";
pub const CONF_ADVANCED_OPTIONS: &str = "advanced_options";
pub const CONF_NETWORK_RANGE: &str = "network_range";
pub const CONF_DEVICES: &str = "devices";
pub const CONF_IGNORE_APPLIANCE: &str = "ignore_appliance";
pub const CONF_IP_ADDRESS: &str = "ip_address";
pub const CONF_ID: &str = "id";
pub const CONF_NAME: &str = "name";
pub const CONF_TYPE: &str = "type";
pub const CONF_TOKEN: &str = "token";
pub const CONF_TOKEN_KEY: &str = "token_key";

/// Description placeholder carrying the error cause.
pub const TAG_CAUSE: &str = "cause";
/// Description placeholder carrying the integration name.
pub const TAG_INTEGRATION: &str = "integration";
/// Description placeholder carrying the appliance id.
pub const TAG_ID: &str = "id";
/// Description placeholder carrying the appliance name.
pub const TAG_NAME: &str = "name";
