// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration entry events.

use crate::entries::EntryId;

/// Events emitted by [`ConfigEntries`](crate::entries::ConfigEntries).
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::entries::EntryId;
/// use midea_dehumidifier_lan::event::EntryEvent;
///
/// let entry_id = EntryId::new();
/// let event = EntryEvent::reload_requested(entry_id);
/// assert!(event.is_reload());
/// assert_eq!(event.entry_id(), entry_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEvent {
    /// A new entry was stored.
    Created {
        /// The ID of the created entry.
        entry_id: EntryId,
    },

    /// An existing entry's data was replaced.
    Updated {
        /// The ID of the updated entry.
        entry_id: EntryId,
    },

    /// An entry was removed.
    Removed {
        /// The ID of the removed entry.
        entry_id: EntryId,
    },

    /// A reload of the entry was scheduled.
    ///
    /// Subscribers owning entities for the entry should rebuild them from
    /// the new data.
    ReloadRequested {
        /// The ID of the entry to reload.
        entry_id: EntryId,
    },

    /// The scheduled reload completed.
    Reloaded {
        /// The ID of the reloaded entry.
        entry_id: EntryId,
        /// Number of devices in the reloaded data.
        device_count: usize,
    },
}

impl EntryEvent {
    /// Returns the entry ID associated with this event.
    #[must_use]
    pub fn entry_id(&self) -> EntryId {
        match self {
            Self::Created { entry_id }
            | Self::Updated { entry_id }
            | Self::Removed { entry_id }
            | Self::ReloadRequested { entry_id }
            | Self::Reloaded { entry_id, .. } => *entry_id,
        }
    }

    /// Returns `true` for reload related events.
    #[must_use]
    pub fn is_reload(&self) -> bool {
        matches!(self, Self::ReloadRequested { .. } | Self::Reloaded { .. })
    }

    /// Creates an entry created event.
    #[must_use]
    pub fn created(entry_id: EntryId) -> Self {
        Self::Created { entry_id }
    }

    /// Creates an entry updated event.
    #[must_use]
    pub fn updated(entry_id: EntryId) -> Self {
        Self::Updated { entry_id }
    }

    /// Creates an entry removed event.
    #[must_use]
    pub fn removed(entry_id: EntryId) -> Self {
        Self::Removed { entry_id }
    }

    /// Creates a reload requested event.
    #[must_use]
    pub fn reload_requested(entry_id: EntryId) -> Self {
        Self::ReloadRequested { entry_id }
    }

    /// Creates a reload completed event.
    #[must_use]
    pub fn reloaded(entry_id: EntryId, device_count: usize) -> Self {
        Self::Reloaded {
            entry_id,
            device_count,
        }
    }
}
