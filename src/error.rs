// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Midea dehumidifier integration.
//!
//! [`Error`] is returned by the flow and the entry store. Collaborators
//! report [`CloudError`], which the flow turns into a [`FlowError`]; entity
//! commands report [`ValueError`] directly.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A setup flow step failed.
    ///
    /// Only fatal flow errors escape the flow as `Err`; recoverable ones are
    /// turned into a redisplayed form.
    #[error("flow error: {0}")]
    Flow(#[from] FlowError),

    /// A raw step submission did not match the step schema.
    #[error("invalid step input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// Reading or writing persisted entries failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The requested configuration entry does not exist.
    #[error("configuration entry not found")]
    EntryNotFound,
}

/// Errors produced by the setup flow stages.
///
/// Every variant has a stable [`code`](Self::code) used as the form error
/// key and an optional [`cause`](Self::cause) rendered into the form
/// description.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The selected mobile application is not in the supported table.
    #[error("unsupported mobile application: {0}")]
    InvalidAppName(String),

    /// Custom application credentials were only partially supplied.
    #[error("both application key and application id are required")]
    InvalidAppKey,

    /// A network range could not be parsed as an IPv4 network.
    #[error("invalid IPv4 network range: {0}")]
    InvalidIpRange(String),

    /// An appliance address could not be parsed as an IPv4 address.
    #[error("invalid IPv4 address: {0}")]
    InvalidIpAddress(String),

    /// No appliance answered at the given address.
    #[error("appliance not discovered at {0}")]
    NotDiscovered(String),

    /// Cloud authentication was rejected.
    #[error("authentication failed: {code} - {message}")]
    InvalidAuth {
        /// Error code reported by the cloud.
        code: i64,
        /// Error message reported by the cloud.
        message: String,
    },

    /// The cloud could not be reached.
    #[error("unable to connect to cloud: {0}")]
    NoCloud(String),

    /// The reconciler ran without credentials.
    #[error("unexpected flow state: credentials missing at entry creation")]
    UnexpectedState,

    /// A step was reached without its required prior input.
    #[error("invalid flow state: {0}")]
    InvalidState(String),
}

impl FlowError {
    /// Returns the stable error code shown to the user.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAppName(_) => "invalid_app_name",
            Self::InvalidAppKey => "invalid_appkey",
            Self::InvalidIpRange(_) => "invalid_ip_range",
            Self::InvalidIpAddress(_) => "invalid_ip_address",
            Self::NotDiscovered(_) => "not_discovered",
            Self::InvalidAuth { .. } => "invalid_auth",
            Self::NoCloud(_) => "no_cloud",
            Self::UnexpectedState => "unexpected_state",
            Self::InvalidState(_) => "invalid_state",
        }
    }

    /// Returns the cause placeholder rendered with the form.
    ///
    /// Authentication failures render as `"<code> - <message>"`, the other
    /// variants carry the offending value.
    #[must_use]
    pub fn cause(&self) -> Option<String> {
        match self {
            Self::InvalidAppName(value)
            | Self::InvalidIpRange(value)
            | Self::InvalidIpAddress(value)
            | Self::NotDiscovered(value)
            | Self::NoCloud(value) => Some(value.clone()),
            Self::InvalidAuth { code, message } => Some(format!("{code} - {message}")),
            Self::InvalidAppKey | Self::UnexpectedState | Self::InvalidState(_) => None,
        }
    }

    /// Returns `true` for errors that abort the flow instead of redisplaying
    /// the current form.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnexpectedState | Self::InvalidState(_))
    }
}

/// Errors reported by the cloud/LAN collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CloudError {
    /// The cloud rejected the account credentials.
    #[error("cloud authentication failed: {code} - {message}")]
    Authentication {
        /// Error code reported by the cloud.
        code: i64,
        /// Error message reported by the cloud.
        message: String,
    },

    /// The cloud could not be reached or returned no session.
    #[error("cloud unavailable: {0}")]
    Unavailable(String),

    /// The worker running a blocking call panicked or was cancelled.
    #[error("cloud worker failed: {0}")]
    Worker(String),
}

impl From<CloudError> for FlowError {
    fn from(err: CloudError) -> Self {
        match err {
            CloudError::Authentication { code, message } => Self::InvalidAuth { code, message },
            CloudError::Unavailable(reason) | CloudError::Worker(reason) => Self::NoCloud(reason),
        }
    }
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
        /// The actual value that was provided.
        actual: i64,
    },

    /// The attribute name is not writable on the appliance.
    #[error("unknown appliance attribute: {0}")]
    UnknownAttribute(String),

    /// The attribute value has the wrong type.
    #[error("invalid value for {attribute}: {value}")]
    InvalidAttributeValue {
        /// The attribute being written.
        attribute: String,
        /// The rejected value, rendered as JSON.
        value: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
