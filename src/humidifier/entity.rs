// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dehumidifier entity adapter.

use crate::appliance::Appliance;
use crate::config::ConfigurationRecord;
use crate::error::ValueError;
use crate::state::{StateChange, Supports};
use crate::types::{DehumidifierMode, HumidityBounds};

/// Mode used when the appliance reports nothing or something unknown.
const FALLBACK_MODE: DehumidifierMode = DehumidifierMode::Set;

/// A dehumidifier exposed to the platform.
///
/// Available modes follow the `supports` block of the latest appliance
/// report.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::appliance::Appliance;
/// use midea_dehumidifier_lan::humidifier::DehumidifierEntity;
/// use midea_dehumidifier_lan::state::{ApplianceState, StateChange, Supports};
/// use midea_dehumidifier_lan::types::DehumidifierMode;
///
/// let appliance = Appliance::new("1001", "Basement", "0xA1").with_state(
///     ApplianceState::new().with_supports(Supports { auto: true, dry_clothes: false, mode: 1 }),
/// );
/// let entity = DehumidifierEntity::new(appliance.clone());
///
/// assert_eq!(
///     entity.available_modes(),
///     [DehumidifierMode::Set, DehumidifierMode::Smart, DehumidifierMode::Continuous, DehumidifierMode::Purifier]
/// );
///
/// entity.set_mode("Smart");
/// assert_eq!(appliance.take_pending(), vec![StateChange::Mode(3)]);
/// ```
#[derive(Debug, Clone)]
pub struct DehumidifierEntity {
    appliance: Appliance,
    bounds: HumidityBounds,
}

impl DehumidifierEntity {
    /// Creates an entity with the default humidity bounds.
    #[must_use]
    pub fn new(appliance: Appliance) -> Self {
        Self {
            appliance,
            bounds: HumidityBounds::default(),
        }
    }

    /// Sets the humidity bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: HumidityBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Returns the underlying appliance.
    #[must_use]
    pub fn appliance(&self) -> &Appliance {
        &self.appliance
    }

    /// Returns the unique id of the entity.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        self.appliance.id()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.appliance.name()
    }

    /// Returns `true` if the appliance is running.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.appliance.state().running().unwrap_or(false)
    }

    /// Returns the current mode.
    ///
    /// Unknown codes are logged and read as [`DehumidifierMode::Set`].
    #[must_use]
    pub fn mode(&self) -> DehumidifierMode {
        let Some(code) = self.appliance.state().mode() else {
            return FALLBACK_MODE;
        };
        DehumidifierMode::from_code(code).unwrap_or_else(|| {
            tracing::warn!(appliance = self.unique_id(), code, "Unknown dehumidifier mode");
            FALLBACK_MODE
        })
    }

    /// Returns the modes offered to the user.
    #[must_use]
    pub fn available_modes(&self) -> Vec<DehumidifierMode> {
        available_modes(&self.appliance.state().supports())
    }

    /// Returns the target humidity, if reported.
    #[must_use]
    pub fn target_humidity(&self) -> Option<u8> {
        self.appliance.state().target_humidity()
    }

    /// Returns the current humidity, if reported.
    #[must_use]
    pub fn current_humidity(&self) -> Option<u8> {
        self.appliance.state().current_humidity()
    }

    /// Returns the lowest settable target humidity.
    #[must_use]
    pub fn min_humidity(&self) -> u8 {
        self.bounds.min()
    }

    /// Returns the highest settable target humidity.
    #[must_use]
    pub fn max_humidity(&self) -> u8 {
        self.bounds.max()
    }

    /// Turns the appliance on.
    pub fn turn_on(&self) {
        self.appliance.apply_change(StateChange::Running(true));
    }

    /// Turns the appliance off.
    pub fn turn_off(&self) {
        self.appliance.apply_change(StateChange::Running(false));
    }

    /// Switches to the mode with the given label.
    ///
    /// Labels without a code, such as `Fan`, and unknown labels are logged
    /// and sent as `Set`.
    pub fn set_mode(&self, label: &str) {
        let code = label
            .parse::<DehumidifierMode>()
            .ok()
            .and_then(DehumidifierMode::code);
        let code = match code {
            Some(code) => code,
            None => {
                tracing::warn!(
                    appliance = self.unique_id(),
                    mode = label,
                    "Unsupported dehumidifier mode"
                );
                FALLBACK_MODE.code().unwrap_or(1)
            }
        };
        self.appliance.apply_change(StateChange::Mode(code));
    }

    /// Sets the target humidity.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `humidity` is outside the bounds.
    pub fn set_humidity(&self, humidity: i64) -> Result<(), ValueError> {
        let humidity = self.bounds.check(humidity)?;
        self.appliance.apply_change(StateChange::TargetHumidity(humidity));
        Ok(())
    }
}

/// Returns the modes a dehumidifier with these features offers, in display
/// order.
fn available_modes(supports: &Supports) -> Vec<DehumidifierMode> {
    let mut modes = vec![DehumidifierMode::Set];
    if supports.auto {
        modes.push(DehumidifierMode::Smart);
    }
    modes.push(DehumidifierMode::Continuous);
    if supports.dry_clothes {
        modes.push(DehumidifierMode::Dry);
    }
    modes.extend_from_slice(supports.extra_modes());
    modes
}

/// Creates entities for the dehumidifiers among `appliances`.
#[must_use]
pub fn dehumidifier_entities(
    appliances: &[Appliance],
    bounds: HumidityBounds,
) -> Vec<DehumidifierEntity> {
    appliances
        .iter()
        .filter(|appliance| appliance.is_dehumidifier())
        .map(|appliance| DehumidifierEntity::new(appliance.clone()).with_bounds(bounds))
        .collect()
}

/// Creates entities for the dehumidifiers of a stored configuration.
///
/// Returns the appliance handles for every configured device alongside, so
/// the caller can feed state reports into them.
#[must_use]
pub fn entities_for_record(
    record: &ConfigurationRecord,
    bounds: HumidityBounds,
) -> (Vec<Appliance>, Vec<DehumidifierEntity>) {
    let appliances: Vec<_> = record.devices.iter().map(Appliance::from_entry).collect();
    let entities = dehumidifier_entities(&appliances, bounds);
    (appliances, entities)
}
