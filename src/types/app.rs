// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mobile application profiles.
//!
//! The Midea cloud identifies the client application by an application key
//! and id pair. Users pick the mobile app they registered their account
//! with, and the pair is resolved from a fixed table.

use std::fmt;

use crate::error::FlowError;

/// Application key used when no profile is selected.
pub const DEFAULT_APPKEY: &str = "3742e9e5842d4ad59c2db887e12449f9";

/// Application id used when no profile is selected.
pub const DEFAULT_APP_ID: u32 = 1017;

/// Name of the profile preselected in the credentials form.
pub const DEFAULT_APP: &str = "NetHome";

/// An entry of the supported applications table.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::types::MobileApp;
///
/// let app = MobileApp::lookup("MideaAir").unwrap();
/// assert_eq!(app.appid, 1117);
/// assert!(MobileApp::lookup("Unknown").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileApp {
    /// Profile name as shown to the user.
    pub name: &'static str,
    /// Cloud application key.
    pub appkey: &'static str,
    /// Cloud application id.
    pub appid: u32,
}

/// Applications whose cloud credentials are known.
pub static SUPPORTED_APPS: &[MobileApp] = &[
    MobileApp {
        name: "NetHome",
        appkey: "3742e9e5842d4ad59c2db887e12449f9",
        appid: 1017,
    },
    MobileApp {
        name: "MideaAir",
        appkey: "ff0cf6f5f0c3471de36341cab3f7a9af",
        appid: 1117,
    },
];

impl MobileApp {
    /// Finds a supported application by its exact profile name.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidAppName`] if the name is not in
    /// [`SUPPORTED_APPS`].
    pub fn lookup(name: &str) -> Result<&'static Self, FlowError> {
        SUPPORTED_APPS
            .iter()
            .find(|app| app.name == name)
            .ok_or_else(|| FlowError::InvalidAppName(name.to_string()))
    }

    /// Returns the names of all supported applications, in table order.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        SUPPORTED_APPS.iter().map(|app| app.name).collect()
    }
}

impl fmt::Display for MobileApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
