// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A stored configuration entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConfigurationRecord;

use super::EntryId;

/// A configuration record stored under a unique id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    entry_id: EntryId,
    unique_id: String,
    title: String,
    data: ConfigurationRecord,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl ConfigEntry {
    pub(crate) fn new(title: impl Into<String>, data: ConfigurationRecord) -> Self {
        let now = Utc::now();
        Self {
            entry_id: EntryId::new(),
            unique_id: data.unique_id().to_string(),
            title: title.into(),
            data,
            created_at: now,
            modified_at: now,
        }
    }

    pub(crate) fn replace_data(&mut self, data: ConfigurationRecord) {
        self.unique_id = data.unique_id().to_string();
        self.data = data;
        self.modified_at = Utc::now();
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    /// Returns the unique id (the account username).
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the stored configuration.
    #[must_use]
    pub fn data(&self) -> &ConfigurationRecord {
        &self.data
    }

    /// Returns when the entry was first stored.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the entry data last changed.
    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }
}
