// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dehumidifier operating modes.
//!
//! The appliance reports its mode as an integer. The mapping between those
//! integers and the labels exposed to the platform is fixed:
//!
//! | Code | Label      |
//! |------|------------|
//! | 1    | Set        |
//! | 2    | Continuous |
//! | 3    | Smart      |
//! | 4    | Dry        |
//! | 6    | Purifier   |
//! | 7    | Antimould  |
//!
//! `Fan` is advertised by some appliances but has no code of its own.

use std::fmt;
use std::str::FromStr;

/// Operating mode of a dehumidifier.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::types::DehumidifierMode;
///
/// assert_eq!(DehumidifierMode::from_code(3), Some(DehumidifierMode::Smart));
/// assert_eq!(DehumidifierMode::Dry.code(), Some(4));
/// assert_eq!(DehumidifierMode::from_code(5), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DehumidifierMode {
    /// Keep the target humidity.
    Set,
    /// Run continuously.
    Continuous,
    /// Automatic mode.
    Smart,
    /// Clothes drying.
    Dry,
    /// Air purification.
    Purifier,
    /// Mould prevention.
    Antimould,
    /// Fan only.
    Fan,
}

/// Code to mode mapping. Codes missing from the table are unknown.
static MODE_CODES: &[(u8, DehumidifierMode)] = &[
    (1, DehumidifierMode::Set),
    (2, DehumidifierMode::Continuous),
    (3, DehumidifierMode::Smart),
    (4, DehumidifierMode::Dry),
    (6, DehumidifierMode::Purifier),
    (7, DehumidifierMode::Antimould),
];

impl DehumidifierMode {
    /// Every mode, including those without a code.
    pub const ALL: [Self; 7] = [
        Self::Set,
        Self::Continuous,
        Self::Smart,
        Self::Dry,
        Self::Purifier,
        Self::Antimould,
        Self::Fan,
    ];

    /// Returns the mode for an appliance code, if the code is known.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        MODE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, mode)| *mode)
    }

    /// Returns the appliance code for this mode.
    ///
    /// Returns `None` for [`Fan`](Self::Fan).
    #[must_use]
    pub fn code(self) -> Option<u8> {
        MODE_CODES
            .iter()
            .find(|(_, mode)| *mode == self)
            .map(|(code, _)| *code)
    }

    /// Returns the label shown to the platform.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Set => "Set",
            Self::Continuous => "Continuous",
            Self::Smart => "Smart",
            Self::Dry => "Dry",
            Self::Purifier => "Purifier",
            Self::Antimould => "Antimould",
            Self::Fan => "Fan",
        }
    }
}

impl fmt::Display for DehumidifierMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DehumidifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label() == s)
            .ok_or_else(|| s.to_string())
    }
}
