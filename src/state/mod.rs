// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Appliance state management types.
//!
//! [`ApplianceState`] holds what the appliance last reported, while
//! [`StateChange`] represents a single write staged for the physical device.
//!
//! # Examples
//!
//! ```
//! use midea_dehumidifier_lan::state::{ApplianceState, StateChange};
//!
//! let mut state = ApplianceState::new();
//!
//! let change = StateChange::Running(true);
//! assert!(state.apply(&change));
//! assert_eq!(state.running(), Some(true));
//! ```

mod appliance_state;
mod state_change;

pub use appliance_state::{ApplianceState, Supports};
pub use state_change::StateChange;
