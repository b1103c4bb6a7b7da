// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory store of configuration entries.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;

use crate::config::ConfigurationRecord;
use crate::error::{Error, Result};
use crate::event::{EntryEvent, EventBus};

use super::{ConfigEntry, EntryId};

/// On-disk layout of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredEntries {
    entries: Vec<ConfigEntry>,
}

/// Configuration entries known to the host, keyed by [`EntryId`].
///
/// Cloning is cheap; clones share the same entries and event bus. Every
/// mutation is announced on the bus, see [`subscribe`](Self::subscribe).
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::config::ConfigurationRecord;
/// use midea_dehumidifier_lan::entries::ConfigEntries;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let entries = ConfigEntries::new();
/// let record = ConfigurationRecord {
///     username: "me@example.com".to_string(),
///     password: "secret".to_string(),
///     appkey: "3742e9e5842d4ad59c2db887e12449f9".to_string(),
///     appid: 1017,
///     network_range: None,
///     devices: Vec::new(),
/// };
///
/// let entry = entries.create("Midea Dehumidifiers", record).await;
/// let found = entries.find_by_unique_id("me@example.com").await.unwrap();
/// assert_eq!(found.entry_id(), entry.entry_id());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigEntries {
    entries: Arc<RwLock<HashMap<EntryId, ConfigEntry>>>,
    event_bus: EventBus,
}

impl ConfigEntries {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to entry lifecycle events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntryEvent> {
        self.event_bus.subscribe()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns `true` if no entry is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns a copy of the entry with the given id.
    pub async fn get(&self, entry_id: EntryId) -> Option<ConfigEntry> {
        self.entries.read().await.get(&entry_id).cloned()
    }

    /// Returns the entry whose unique id matches `unique_id`.
    pub async fn find_by_unique_id(&self, unique_id: &str) -> Option<ConfigEntry> {
        self.entries
            .read()
            .await
            .values()
            .find(|entry| entry.unique_id() == unique_id)
            .cloned()
    }

    /// Returns copies of all entries, oldest first.
    pub async fn entries(&self) -> Vec<ConfigEntry> {
        let mut entries: Vec<_> = self.entries.read().await.values().cloned().collect();
        entries.sort_by_key(ConfigEntry::created_at);
        entries
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Stores a new entry.
    pub async fn create(&self, title: &str, data: ConfigurationRecord) -> ConfigEntry {
        let entry = ConfigEntry::new(title, data);
        let entry_id = entry.entry_id();

        self.entries.write().await.insert(entry_id, entry.clone());

        tracing::info!(
            entry_id = %entry_id,
            devices = entry.data().devices.len(),
            "Configuration entry created"
        );
        self.event_bus.publish(EntryEvent::created(entry_id));
        entry
    }

    /// Replaces the data of an existing entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntryNotFound` if no entry has the given id.
    pub async fn update(&self, entry_id: EntryId, data: ConfigurationRecord) -> Result<ConfigEntry> {
        let updated = {
            let mut entries = self.entries.write().await;
            let entry = entries.get_mut(&entry_id).ok_or(Error::EntryNotFound)?;
            entry.replace_data(data);
            entry.clone()
        };

        tracing::info!(
            entry_id = %entry_id,
            devices = updated.data().devices.len(),
            "Configuration entry updated"
        );
        self.event_bus.publish(EntryEvent::updated(entry_id));
        Ok(updated)
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntryNotFound` if no entry has the given id.
    pub async fn remove(&self, entry_id: EntryId) -> Result<ConfigEntry> {
        let removed = self
            .entries
            .write()
            .await
            .remove(&entry_id)
            .ok_or(Error::EntryNotFound)?;

        tracing::info!(entry_id = %entry_id, "Configuration entry removed");
        self.event_bus.publish(EntryEvent::removed(entry_id));
        Ok(removed)
    }

    /// Schedules a reload of the entry on the runtime.
    ///
    /// The spawned task announces [`EntryEvent::ReloadRequested`] and then
    /// [`EntryEvent::Reloaded`] with the device count of the current data.
    /// Nothing is published if the entry is gone by the time the task runs.
    pub fn schedule_reload(&self, entry_id: EntryId) -> JoinHandle<()> {
        let entries = Arc::clone(&self.entries);
        let event_bus = self.event_bus.clone();

        tokio::spawn(async move {
            let Some(device_count) = entries
                .read()
                .await
                .get(&entry_id)
                .map(|entry| entry.data().devices.len())
            else {
                tracing::warn!(entry_id = %entry_id, "Reload scheduled for unknown entry");
                return;
            };

            let listeners = event_bus.publish_counted(EntryEvent::reload_requested(entry_id));
            if listeners == 0 {
                tracing::debug!(entry_id = %entry_id, "Reload requested with no listener");
            }
            tracing::debug!(entry_id = %entry_id, device_count, "Configuration entry reloaded");
            event_bus.publish(EntryEvent::reloaded(entry_id, device_count));
        })
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Writes all entries to `path` as pretty JSON.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file cannot be written.
    pub async fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let stored = StoredEntries {
            entries: self.entries().await,
        };
        let contents = serde_json::to_string_pretty(&stored)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;

        tracing::info!(
            path = %path.display(),
            entries = stored.entries.len(),
            "Saved configuration entries"
        );
        Ok(())
    }

    /// Loads a store previously written by [`save_to`](Self::save_to).
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Storage` if the file cannot be read, or
    /// `Error::InvalidInput` if it is not a valid entry file.
    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !tokio::fs::try_exists(path).await? {
            tracing::info!(path = %path.display(), "No entry file found, starting empty");
            return Ok(Self::new());
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let stored: StoredEntries = serde_json::from_str(&contents).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse entry file");
        })?;

        tracing::info!(
            path = %path.display(),
            entries = stored.entries.len(),
            "Loaded configuration entries"
        );
        let entries = stored
            .entries
            .into_iter()
            .map(|entry| (entry.entry_id(), entry))
            .collect();
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            event_bus: EventBus::new(),
        })
    }
}
