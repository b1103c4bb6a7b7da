// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliances known to the integration.
//!
//! - [`ApplianceRecord`] is the setup-time view of an appliance: the cloud
//!   inventory entry plus whatever the user supplied for it.
//! - [`Appliance`] is the runtime handle an entity reads state from and
//!   stages writes through.

mod handle;
mod record;

pub use handle::Appliance;
pub use record::{ApplianceAddress, ApplianceRecord, DEHUMIDIFIER_TYPE, is_dehumidifier_type};
