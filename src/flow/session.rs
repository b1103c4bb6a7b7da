// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State accumulated across the steps of one setup flow.

use std::fmt;
use std::sync::Arc;

use crate::appliance::ApplianceRecord;
use crate::cloud::Credentials;

/// Values collected by one setup flow.
///
/// Stages never mutate a session in place. Each successful stage returns a
/// new session which the flow commits; a failed stage leaves the committed
/// session untouched.
pub struct FlowSession<S> {
    pub(crate) credentials: Option<Credentials>,
    pub(crate) advanced_options_enabled: bool,
    pub(crate) network_range: Option<String>,
    pub(crate) appliances: Vec<ApplianceRecord>,
    pub(crate) cursor: Option<usize>,
    pub(crate) last_error_cause: Option<String>,
    pub(crate) cloud_session: Option<Arc<S>>,
}

impl<S> FlowSession<S> {
    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            credentials: None,
            advanced_options_enabled: false,
            network_range: None,
            appliances: Vec::new(),
            cursor: None,
            last_error_cause: None,
            cloud_session: None,
        }
    }

    /// Returns the resolved cloud credentials.
    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns `true` if the user asked for the advanced options step.
    #[must_use]
    pub fn advanced_options_enabled(&self) -> bool {
        self.advanced_options_enabled
    }

    /// Returns the network range discovery is restricted to.
    #[must_use]
    pub fn network_range(&self) -> Option<&str> {
        self.network_range.as_deref()
    }

    /// Returns the appliances known so far, in inventory order.
    #[must_use]
    pub fn appliances(&self) -> &[ApplianceRecord] {
        &self.appliances
    }

    /// Returns the index of the appliance being configured manually.
    #[must_use]
    pub fn current_unreachable_index(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns the appliance being configured manually.
    #[must_use]
    pub fn current_unreachable(&self) -> Option<&ApplianceRecord> {
        self.cursor.and_then(|index| self.appliances.get(index))
    }

    /// Returns the cause of the last failed attempt.
    #[must_use]
    pub fn last_error_cause(&self) -> Option<&str> {
        self.last_error_cause.as_deref()
    }

    /// Returns the cloud session obtained by discovery.
    #[must_use]
    pub fn cloud_session(&self) -> Option<&Arc<S>> {
        self.cloud_session.as_ref()
    }

    /// Returns the index of the first unresolved appliance at or after `from`.
    pub(crate) fn next_unresolved(&self, from: usize) -> Option<usize> {
        self.appliances
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, appliance)| appliance.address.is_unresolved())
            .map(|(index, _)| index)
    }
}

impl<S> Default for FlowSession<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for FlowSession<S> {
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            advanced_options_enabled: self.advanced_options_enabled,
            network_range: self.network_range.clone(),
            appliances: self.appliances.clone(),
            cursor: self.cursor,
            last_error_cause: self.last_error_cause.clone(),
            cloud_session: self.cloud_session.clone(),
        }
    }
}

impl<S> fmt::Debug for FlowSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowSession")
            .field("credentials", &self.credentials)
            .field("advanced_options_enabled", &self.advanced_options_enabled)
            .field("network_range", &self.network_range)
            .field("appliances", &self.appliances.len())
            .field("cursor", &self.cursor)
            .field("last_error_cause", &self.last_error_cause)
            .field("cloud_session", &self.cloud_session.is_some())
            .finish()
    }
}
