// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state tracking.

use serde::{Deserialize, Serialize};

use crate::types::DehumidifierMode;

use super::StateChange;

/// Optional features reported by a dehumidifier.
///
/// Missing keys default to "not supported".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supports {
    /// Smart (automatic) mode is available.
    #[serde(default)]
    pub auto: bool,
    /// Clothes drying mode is available.
    #[serde(default)]
    pub dry_clothes: bool,
    /// Extra modes selector (0-4).
    ///
    /// 1 adds Purifier, 2 adds Antimould, 3 adds both, 4 adds Fan.
    #[serde(default)]
    pub mode: u8,
}

impl Supports {
    /// Returns the modes enabled by the extra modes selector.
    #[must_use]
    pub fn extra_modes(&self) -> &'static [DehumidifierMode] {
        match self.mode {
            1 => &[DehumidifierMode::Purifier],
            2 => &[DehumidifierMode::Antimould],
            3 => &[DehumidifierMode::Purifier, DehumidifierMode::Antimould],
            4 => &[DehumidifierMode::Fan],
            _ => &[],
        }
    }
}

/// Last known state of a dehumidifier.
///
/// Fields are optional because the state may not be known until the
/// appliance reports it.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::state::ApplianceState;
///
/// let state = ApplianceState::new()
///     .with_running(true)
///     .with_mode(3)
///     .with_target_humidity(55);
/// assert_eq!(state.mode(), Some(3));
/// assert_eq!(state.target_humidity(), Some(55));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplianceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mode: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_humidity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_humidity: Option<u8>,
    #[serde(default)]
    supports: Supports,
}

impl ApplianceState {
    /// Creates a new empty appliance state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the running flag.
    #[must_use]
    pub fn with_running(mut self, running: bool) -> Self {
        self.running = Some(running);
        self
    }

    /// Sets the raw mode code.
    #[must_use]
    pub fn with_mode(mut self, mode: u8) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the target humidity.
    #[must_use]
    pub fn with_target_humidity(mut self, humidity: u8) -> Self {
        self.target_humidity = Some(humidity);
        self
    }

    /// Sets the measured humidity.
    #[must_use]
    pub fn with_current_humidity(mut self, humidity: u8) -> Self {
        self.current_humidity = Some(humidity);
        self
    }

    /// Sets the supported feature flags.
    #[must_use]
    pub fn with_supports(mut self, supports: Supports) -> Self {
        self.supports = supports;
        self
    }

    /// Returns whether the appliance is running.
    #[must_use]
    pub fn running(&self) -> Option<bool> {
        self.running
    }

    /// Returns the raw mode code.
    #[must_use]
    pub fn mode(&self) -> Option<u8> {
        self.mode
    }

    /// Returns the target humidity in percent.
    #[must_use]
    pub fn target_humidity(&self) -> Option<u8> {
        self.target_humidity
    }

    /// Returns the measured humidity in percent.
    #[must_use]
    pub fn current_humidity(&self) -> Option<u8> {
        self.current_humidity
    }

    /// Returns the supported feature flags.
    #[must_use]
    pub fn supports(&self) -> Supports {
        self.supports
    }

    /// Applies a state change.
    ///
    /// Returns `true` if the state was modified.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Running(running) => replace(&mut self.running, *running),
            StateChange::Mode(mode) => replace(&mut self.mode, *mode),
            StateChange::TargetHumidity(humidity) => {
                replace(&mut self.target_humidity, *humidity)
            }
        }
    }

    /// Merges another report into this state.
    ///
    /// Known values of `other` overwrite the current ones; feature flags are
    /// always taken from `other`.
    pub fn merge(&mut self, other: &ApplianceState) {
        if other.running.is_some() {
            self.running = other.running;
        }
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.target_humidity.is_some() {
            self.target_humidity = other.target_humidity;
        }
        if other.current_humidity.is_some() {
            self.current_humidity = other.current_humidity;
        }
        self.supports = other.supports;
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    if slot.as_ref() == Some(&value) {
        false
    } else {
        *slot = Some(value);
        true
    }
}
