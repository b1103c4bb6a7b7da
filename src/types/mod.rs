// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the setup flow and the entity adapter.
//!
//! # Types
//!
//! - [`MobileApp`] - Supported mobile application profiles and their cloud credentials
//! - [`DehumidifierMode`] - Operating modes and their fixed appliance codes
//! - [`HumidityBounds`] - Accepted target humidity range

mod app;
mod humidity;
mod mode;

pub use app::{DEFAULT_APP, DEFAULT_APP_ID, DEFAULT_APPKEY, MobileApp, SUPPORTED_APPS};
pub use humidity::{HumidityBounds, MAX_TARGET_HUMIDITY, MIN_TARGET_HUMIDITY};
pub use mode::DehumidifierMode;
