// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Midea dehumidifiers on the local network.
//!
//! This library provides the two pieces a home-automation host needs to
//! integrate Midea dehumidifiers:
//!
//! - **Setup flow** ([`flow`]): a resumable, multi-step wizard that signs in
//!   to the Midea cloud, discovers the account's appliances on the local
//!   network, lets the user configure the ones discovery could not reach,
//!   and stores the result as a configuration entry.
//! - **Entity adapter** ([`humidifier`]): exposes each configured
//!   dehumidifier's power, operating mode and target humidity.
//!
//! The cloud client and the appliance wire protocol are not part of this
//! crate. The flow consumes them through the [`cloud::CloudService`] trait;
//! synchronous clients can be plugged in with [`cloud::BlockingCloud`].
//!
//! # Quick Start
//!
//! ```ignore
//! use midea_dehumidifier_lan::entries::ConfigEntries;
//! use midea_dehumidifier_lan::flow::{ConfigFlow, FlowResult, UnreachableApplianceInput, UserInput};
//!
//! #[tokio::main]
//! async fn main() -> midea_dehumidifier_lan::Result<()> {
//!     let entries = ConfigEntries::new();
//!     let mut flow = ConfigFlow::user(MyCloud::default(), entries.clone());
//!
//!     // Show the credentials form, then submit it
//!     let _form = flow.step_user(None).await?;
//!     let mut result = flow
//!         .step_user(Some(UserInput::new("me@example.com", "secret")))
//!         .await?;
//!
//!     // Skip every appliance discovery could not reach
//!     while let FlowResult::Form(_) = result {
//!         result = flow
//!             .step_unreachable_appliance(Some(UnreachableApplianceInput::ignore()))
//!             .await?;
//!     }
//!
//!     entries.save_to("entries.json").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Entities
//!
//! ```
//! use midea_dehumidifier_lan::appliance::Appliance;
//! use midea_dehumidifier_lan::humidifier::dehumidifier_entities;
//! use midea_dehumidifier_lan::types::HumidityBounds;
//!
//! let appliances = [
//!     Appliance::new("1001", "Basement", "0xA1"),
//!     Appliance::new("1002", "Living room", "0xAC"),
//! ];
//! let entities = dehumidifier_entities(&appliances, HumidityBounds::default());
//! assert_eq!(entities.len(), 1);
//!
//! entities[0].turn_on();
//! entities[0].set_mode("Smart");
//! assert!(entities[0].is_on());
//! ```

pub mod appliance;
pub mod cloud;
pub mod config;
pub mod entries;
pub mod error;
pub mod event;
pub mod flow;
pub mod humidifier;
pub mod state;
pub mod types;

pub use appliance::{Appliance, ApplianceAddress, ApplianceRecord};
pub use cloud::{BlockingCloud, BlockingCloudService, CloudService, Credentials};
pub use config::{ConfigurationRecord, DeviceEntry, FlowOptions};
pub use entries::{ConfigEntries, ConfigEntry, EntryId};
pub use error::{CloudError, Error, FlowError, Result, ValueError};
pub use flow::{ConfigFlow, FlowResult, FlowSession, FormDescriptor, StepId};
pub use humidifier::{DehumidifierEntity, dehumidifier_entities};
pub use state::{ApplianceState, StateChange, Supports};
pub use types::{DehumidifierMode, HumidityBounds, MobileApp};
