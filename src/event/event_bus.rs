// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast bus for entry events.

use tokio::sync::broadcast;

use super::EntryEvent;

const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts [`EntryEvent`]s to every subscriber.
///
/// Each subscriber receives its own copy of every event published after it
/// subscribed. A subscriber that falls more than `capacity` events behind
/// gets `RecvError::Lagged` and loses the oldest events.
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::entries::EntryId;
/// use midea_dehumidifier_lan::event::{EntryEvent, EventBus};
///
/// let bus = EventBus::new();
/// let _rx = bus.subscribe();
///
/// let delivered = bus.publish_counted(EntryEvent::created(EntryId::new()));
/// assert_eq!(delivered, 1);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EntryEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a bus buffering at most `capacity` events per subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to entry events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EntryEvent> {
        self.sender.subscribe()
    }

    /// Publishes an event. Discarded when nobody is listening.
    pub fn publish(&self, event: EntryEvent) {
        let _ = self.sender.send(event);
    }

    /// Publishes an event and returns how many subscribers got it.
    #[must_use]
    pub fn publish_counted(&self, event: EntryEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
