// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step identifiers, transitions and flow results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entries::ConfigEntry;

use super::form::FormDescriptor;

/// A user-facing step of the setup flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Account credentials and mobile app profile.
    User,
    /// Custom application credentials and network range.
    AdvancedOptions,
    /// Manual configuration of one appliance discovery could not reach.
    UnreachableAppliance,
}

impl StepId {
    /// Returns the form identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::AdvancedOptions => "advanced_options",
            Self::UnreachableAppliance => "unreachable_appliance",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "advanced_options" => Ok(Self::AdvancedOptions),
            "unreachable_appliance" => Ok(Self::UnreachableAppliance),
            other => Err(format!("unknown step: {other}")),
        }
    }
}

/// What the flow does after a stage succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Display a fresh form for the step.
    ShowForm(StepId),
    /// Authenticate and list appliances.
    RunDiscovery,
    /// Build the configuration record and store it.
    Reconcile,
}

/// How the flow was started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowSource {
    /// The user added the integration.
    #[default]
    User,
    /// The host asked for fresh credentials for an existing entry.
    Reauth,
}

/// Why a flow ended without creating an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// An existing entry for the account was overwritten and reloaded.
    ReauthSuccessful,
    /// An entry already exists and only one is allowed.
    SingleInstanceAllowed,
}

impl AbortReason {
    /// Returns the reason identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReauthSuccessful => "reauth_successful",
            Self::SingleInstanceAllowed => "single_instance_allowed",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handling one step.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowResult {
    /// Display a form and wait for the next submission.
    Form(FormDescriptor),
    /// The flow finished and stored a new entry.
    CreateEntry {
        /// Entry title.
        title: String,
        /// The stored entry.
        entry: ConfigEntry,
    },
    /// The flow finished without creating an entry.
    Abort {
        /// Why the flow ended.
        reason: AbortReason,
    },
}

impl FlowResult {
    /// Returns the form if this result displays one.
    #[must_use]
    pub fn form(&self) -> Option<&FormDescriptor> {
        match self {
            Self::Form(form) => Some(form),
            Self::CreateEntry { .. } | Self::Abort { .. } => None,
        }
    }

    /// Returns the step id of a displayed form.
    #[must_use]
    pub fn step_id(&self) -> Option<StepId> {
        self.form().map(FormDescriptor::step_id)
    }

    /// Returns the created entry.
    #[must_use]
    pub fn created_entry(&self) -> Option<&ConfigEntry> {
        match self {
            Self::CreateEntry { entry, .. } => Some(entry),
            Self::Form(_) | Self::Abort { .. } => None,
        }
    }

    /// Returns the abort reason.
    #[must_use]
    pub fn abort_reason(&self) -> Option<AbortReason> {
        match self {
            Self::Abort { reason } => Some(*reason),
            Self::Form(_) | Self::CreateEntry { .. } => None,
        }
    }

    /// Returns `true` if the flow is finished.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Form(_))
    }
}
