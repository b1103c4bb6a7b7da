// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration entries produced by the setup flow.
//!
//! The [`ConfigEntries`] store plays the host's part: it holds the entries,
//! looks them up by unique id during reauthentication and schedules
//! reloads after an entry is rewritten.

mod config_entry;
mod entry_id;
mod store;

pub use config_entry::ConfigEntry;
pub use entry_id::EntryId;
pub use store::ConfigEntries;
