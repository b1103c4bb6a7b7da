// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The setup flow.
//!
//! Steps run strictly forward:
//!
//! ```text
//! user -> [advanced_options] -> discovery -> [unreachable_appliance]* -> entry
//! ```
//!
//! Each stage is a function from the committed [`FlowSession`] and a typed
//! submission to a new session plus a [`NextStep`]. [`ConfigFlow`] commits
//! the new session when the stage succeeds, awaits the cloud collaborator
//! for discovery and probes, and renders [`FormDescriptor`]s for the host.
//!
//! A failed submission redisplays the same form with the submitted values,
//! and leaves the committed session, the appliance cursor and every
//! appliance already configured unchanged.

mod config_flow;
mod credentials;
mod discovery;
mod form;
mod input;
mod reconcile;
mod session;
mod step;
mod unreachable;

pub use config_flow::ConfigFlow;
pub use credentials::{submit_advanced_options, submit_user};
pub use discovery::{apply_discovery, discovery_request};
pub use form::{BASE_ERROR, FieldKind, FormDescriptor, FormField};
pub use input::{AdvancedOptionsInput, UnreachableApplianceInput, UserInput};
pub use reconcile::{build_record, store_record};
pub use session::FlowSession;
pub use step::{AbortReason, FlowResult, FlowSource, NextStep, StepId};
pub use unreachable::{PendingAppliance, commit_appliance, confirm_probe, prepare_submission};
