// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dehumidifier entities.
//!
//! Maps an [`Appliance`](crate::appliance::Appliance) onto the platform's
//! humidifier model: on/off, a named operating mode and a bounded target
//! humidity.

mod entity;

pub use entity::{DehumidifierEntity, dehumidifier_entities, entities_for_record};
