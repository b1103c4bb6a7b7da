// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared appliance handle used by entities.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::config::DeviceEntry;
use crate::error::ValueError;
use crate::state::{ApplianceState, StateChange};

use super::record::is_dehumidifier_type;

/// A configured appliance and its last known state.
///
/// Cloning is cheap; all clones share the same state and pending queue.
/// Writes made through [`apply`](Self::apply) are applied to the local
/// state immediately and queued until the device link drains them with
/// [`take_pending`](Self::take_pending).
///
/// # Examples
///
/// ```
/// use midea_dehumidifier_lan::appliance::Appliance;
/// use midea_dehumidifier_lan::state::StateChange;
/// use serde_json::json;
///
/// let appliance = Appliance::new("1001", "Basement", "0xA1");
/// appliance.apply("running", &json!(true)).unwrap();
///
/// assert_eq!(appliance.state().running(), Some(true));
/// assert_eq!(appliance.take_pending(), vec![StateChange::Running(true)]);
/// assert_eq!(appliance.pending_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Appliance {
    id: Arc<str>,
    name: Arc<str>,
    appliance_type: Arc<str>,
    state: Arc<RwLock<ApplianceState>>,
    pending: Arc<Mutex<Vec<StateChange>>>,
}

impl Appliance {
    /// Creates an appliance with an empty state.
    #[must_use]
    pub fn new(id: &str, name: &str, appliance_type: &str) -> Self {
        Self {
            id: Arc::from(id),
            name: Arc::from(name),
            appliance_type: Arc::from(appliance_type),
            state: Arc::new(RwLock::new(ApplianceState::new())),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates an appliance for a persisted device entry.
    #[must_use]
    pub fn from_entry(entry: &DeviceEntry) -> Self {
        Self::new(&entry.id, &entry.name, &entry.appliance_type)
    }

    /// Sets the initial state.
    #[must_use]
    pub fn with_state(self, state: ApplianceState) -> Self {
        *self.state.write() = state;
        self
    }

    /// Returns the cloud identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the appliance type code.
    #[must_use]
    pub fn appliance_type(&self) -> &str {
        &self.appliance_type
    }

    /// Returns `true` if this appliance is a dehumidifier.
    #[must_use]
    pub fn is_dehumidifier(&self) -> bool {
        is_dehumidifier_type(&self.appliance_type)
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ApplianceState {
        self.state.read().clone()
    }

    /// Merges a fresh report from the device.
    pub fn update_state(&self, report: &ApplianceState) {
        self.state.write().merge(report);
    }

    /// Stages a write of `value` to the named attribute.
    ///
    /// # Errors
    ///
    /// Returns `ValueError` if the attribute is unknown or the value is
    /// invalid for it. Nothing is staged in that case.
    pub fn apply(&self, attribute: &str, value: &Value) -> Result<(), ValueError> {
        let change = StateChange::from_attribute(attribute, value)?;
        self.apply_change(change);
        Ok(())
    }

    /// Stages a typed state change.
    pub fn apply_change(&self, change: StateChange) {
        tracing::debug!(
            appliance = %self.id,
            attribute = change.attribute(),
            "Staging appliance change"
        );
        self.state.write().apply(&change);
        self.pending.lock().push(change);
    }

    /// Returns the number of staged changes.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Drains staged changes in the order they were made.
    #[must_use]
    pub fn take_pending(&self) -> Vec<StateChange> {
        std::mem::take(&mut *self.pending.lock())
    }
}
