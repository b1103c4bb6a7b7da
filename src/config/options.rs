// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setup flow options.

use crate::types::DEFAULT_APP;

use super::{DEFAULT_PASSWORD, DEFAULT_USERNAME, ENTRY_TITLE};

/// Options for a setup flow.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::config::FlowOptions;
///
/// let options = FlowOptions::new()
///     .with_title("Basement")
///     .with_default_app("MideaAir")
///     .allow_multiple_instances();
///
/// assert_eq!(options.title(), "Basement");
/// assert_eq!(options.default_app(), "MideaAir");
/// assert!(!options.single_instance());
/// ```
#[derive(Debug, Clone)]
pub struct FlowOptions {
    title: String,
    default_username: String,
    default_password: String,
    default_app: String,
    single_instance: bool,
}

impl FlowOptions {
    /// Creates options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title given to created entries.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the placeholder credentials used when the form fields are empty.
    #[must_use]
    pub fn with_default_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.default_username = username.into();
        self.default_password = password.into();
        self
    }

    /// Sets the mobile app preselected in the credentials form.
    #[must_use]
    pub fn with_default_app(mut self, app: impl Into<String>) -> Self {
        self.default_app = app.into();
        self
    }

    /// Lets user-initiated flows run while entries already exist.
    #[must_use]
    pub fn allow_multiple_instances(mut self) -> Self {
        self.single_instance = false;
        self
    }

    /// Returns the entry title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the placeholder username.
    #[must_use]
    pub fn default_username(&self) -> &str {
        &self.default_username
    }

    /// Returns the placeholder password.
    #[must_use]
    pub fn default_password(&self) -> &str {
        &self.default_password
    }

    /// Returns the preselected mobile app.
    #[must_use]
    pub fn default_app(&self) -> &str {
        &self.default_app
    }

    /// Returns `true` if user-initiated flows abort when an entry exists.
    #[must_use]
    pub fn single_instance(&self) -> bool {
        self.single_instance
    }
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            title: ENTRY_TITLE.to_string(),
            default_username: DEFAULT_USERNAME.to_string(),
            default_password: DEFAULT_PASSWORD.to_string(),
            default_app: DEFAULT_APP.to_string(),
            single_instance: true,
        }
    }
}
