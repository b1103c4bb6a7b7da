// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Discovery stage.
//!
//! Discovery itself is an await on the cloud collaborator performed by the
//! flow; this module builds the request and folds the result into the
//! session.

use std::sync::Arc;

use crate::cloud::{Discovery, DiscoveryRequest};
use crate::config::parse_network_range;
use crate::error::FlowError;

use super::session::FlowSession;
use super::step::{NextStep, StepId};

/// Builds the discovery request from the session.
///
/// # Errors
///
/// Returns `FlowError::InvalidState` if no credentials were collected, or
/// `FlowError::InvalidIpRange` if the stored range no longer parses.
pub fn discovery_request<S>(session: &FlowSession<S>) -> Result<DiscoveryRequest, FlowError> {
    let credentials = session.credentials.clone().ok_or_else(|| {
        FlowError::InvalidState("discovery started before account credentials".to_string())
    })?;
    let networks = session
        .network_range
        .as_deref()
        .map(parse_network_range)
        .transpose()?
        .into_iter()
        .collect();

    Ok(DiscoveryRequest {
        credentials,
        networks,
    })
}

/// Stores the discovered appliances and the cloud session.
///
/// Moves to the first appliance without an address, or straight to
/// reconciliation when every appliance was found.
#[must_use]
pub fn apply_discovery<S>(
    session: &FlowSession<S>,
    discovery: Discovery<S>,
) -> (FlowSession<S>, NextStep) {
    let mut next_session = FlowSession {
        appliances: discovery.appliances,
        cloud_session: Some(Arc::new(discovery.session)),
        cursor: None,
        last_error_cause: None,
        ..session.clone()
    };

    next_session.cursor = next_session.next_unresolved(0);
    let next = match next_session.cursor {
        Some(_) => NextStep::ShowForm(StepId::UnreachableAppliance),
        None => NextStep::Reconcile,
    };
    (next_session, next)
}
