// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! State changes are writes staged by the entity adapter. They are applied
//! optimistically to the local [`ApplianceState`](super::ApplianceState)
//! and queued for delivery to the physical device.
//!
//! The platform addresses attributes by name, so a change can be built from
//! an attribute name and a JSON value:
//!
//! ```
//! use midea_dehumidifier_lan::state::StateChange;
//! use serde_json::json;
//!
//! let change = StateChange::from_attribute("target_humidity", &json!(55)).unwrap();
//! assert_eq!(change, StateChange::TargetHumidity(55));
//! assert_eq!(change.attribute(), "target_humidity");
//!
//! assert!(StateChange::from_attribute("fan_speed", &json!(40)).is_err());
//! ```

use serde_json::Value;

use crate::error::ValueError;

/// Attribute name of the running flag.
pub const ATTR_RUNNING: &str = "running";
/// Attribute name of the mode code.
pub const ATTR_MODE: &str = "mode";
/// Attribute name of the target humidity.
pub const ATTR_TARGET_HUMIDITY: &str = "target_humidity";

/// A write to a single appliance attribute.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// Turn the appliance on or off.
    Running(bool),

    /// Switch to the mode with this code.
    Mode(u8),

    /// Change the target humidity, in percent.
    TargetHumidity(u8),
}

impl StateChange {
    /// Builds a change from an attribute name and value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownAttribute` for names other than `running`,
    /// `mode` and `target_humidity`, and `ValueError::InvalidAttributeValue`
    /// when the value has the wrong type or does not fit.
    pub fn from_attribute(attribute: &str, value: &Value) -> Result<Self, ValueError> {
        let invalid = || ValueError::InvalidAttributeValue {
            attribute: attribute.to_string(),
            value: value.to_string(),
        };

        match attribute {
            ATTR_RUNNING => value.as_bool().map(Self::Running).ok_or_else(invalid),
            ATTR_MODE => value
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .map(Self::Mode)
                .ok_or_else(invalid),
            ATTR_TARGET_HUMIDITY => value
                .as_u64()
                .filter(|v| *v <= 100)
                .and_then(|v| u8::try_from(v).ok())
                .map(Self::TargetHumidity)
                .ok_or_else(invalid),
            other => Err(ValueError::UnknownAttribute(other.to_string())),
        }
    }

    /// Returns the attribute name this change writes.
    #[must_use]
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Running(_) => ATTR_RUNNING,
            Self::Mode(_) => ATTR_MODE,
            Self::TargetHumidity(_) => ATTR_TARGET_HUMIDITY,
        }
    }
}
