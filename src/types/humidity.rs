// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Target humidity bounds.

use crate::error::ValueError;

/// Lowest target humidity accepted by the appliances, in percent.
pub const MIN_TARGET_HUMIDITY: u8 = 35;

/// Highest target humidity accepted by the appliances, in percent.
pub const MAX_TARGET_HUMIDITY: u8 = 85;

/// Inclusive range of target humidity values an entity accepts.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::types::HumidityBounds;
///
/// let bounds = HumidityBounds::default();
/// assert_eq!(bounds.min(), 35);
/// assert_eq!(bounds.max(), 85);
/// assert!(bounds.check(50).is_ok());
/// assert!(bounds.check(90).is_err());
///
/// let narrow = HumidityBounds::new().with_min(40).with_max(60);
/// assert!(narrow.check(30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumidityBounds {
    min: u8,
    max: u8,
}

impl HumidityBounds {
    /// Creates bounds with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum target humidity.
    ///
    /// The maximum is raised to `min` if it was lower.
    #[must_use]
    pub fn with_min(mut self, min: u8) -> Self {
        self.min = min;
        self.max = self.max.max(min);
        self
    }

    /// Sets the maximum target humidity.
    ///
    /// The minimum is lowered to `max` if it was higher.
    #[must_use]
    pub fn with_max(mut self, max: u8) -> Self {
        self.max = max;
        self.min = self.min.min(max);
        self
    }

    /// Returns the minimum target humidity.
    #[must_use]
    pub const fn min(&self) -> u8 {
        self.min
    }

    /// Returns the maximum target humidity.
    #[must_use]
    pub const fn max(&self) -> u8 {
        self.max
    }

    /// Validates a requested target humidity.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the value lies outside the bounds.
    pub fn check(&self, value: i64) -> Result<u8, ValueError> {
        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(ValueError::OutOfRange {
                min: self.min,
                max: self.max,
                actual: value,
            });
        }
        u8::try_from(value).map_err(|_| ValueError::OutOfRange {
            min: self.min,
            max: self.max,
            actual: value,
        })
    }
}

impl Default for HumidityBounds {
    fn default() -> Self {
        Self {
            min: MIN_TARGET_HUMIDITY,
            max: MAX_TARGET_HUMIDITY,
        }
    }
}
