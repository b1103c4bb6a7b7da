// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for configuration entry lifecycle.
//!
//! The [`EventBus`] uses tokio's broadcast channel so that any number of
//! subscribers (entity platforms, a coordinator) learn when entries are
//! created, updated or reloaded.
//!
//! # Examples
//!
//! ```
//! use midea_dehumidifier_lan::entries::EntryId;
//! use midea_dehumidifier_lan::event::{EntryEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(EntryEvent::created(EntryId::new()));
//! ```

mod entry_event;
mod event_bus;

pub use entry_event::EntryEvent;
pub use event_bus::EventBus;
