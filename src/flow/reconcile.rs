// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turns a finished session into a stored configuration entry.

use crate::config::{ConfigurationRecord, DeviceEntry};
use crate::entries::ConfigEntries;
use crate::error::{FlowError, Result};

use super::session::FlowSession;
use super::step::{AbortReason, FlowResult};

/// Builds the configuration record from the session.
///
/// Only appliances with a resolved address are kept; ignored ones are
/// dropped.
///
/// # Errors
///
/// Returns `FlowError::UnexpectedState` if the session has no credentials.
pub fn build_record<S>(
    session: &FlowSession<S>,
) -> std::result::Result<ConfigurationRecord, FlowError> {
    let Some(credentials) = session.credentials.as_ref() else {
        tracing::error!("Configuration entry requested before credentials were set");
        return Err(FlowError::UnexpectedState);
    };

    let devices = session
        .appliances
        .iter()
        .filter_map(DeviceEntry::from_record)
        .collect();

    Ok(ConfigurationRecord {
        username: credentials.username.clone(),
        password: credentials.password.clone(),
        appkey: credentials.appkey.clone(),
        appid: credentials.appid,
        network_range: session.network_range.clone(),
        devices,
    })
}

/// Stores `record`, replacing the entry of the same account if there is one.
///
/// A replaced entry is reloaded in the background and the flow ends with
/// [`AbortReason::ReauthSuccessful`].
///
/// # Errors
///
/// Returns `Error::EntryNotFound` if the matching entry disappears while it
/// is being replaced.
pub async fn store_record(
    entries: &ConfigEntries,
    title: &str,
    record: ConfigurationRecord,
) -> Result<FlowResult> {
    if let Some(existing) = entries.find_by_unique_id(record.unique_id()).await {
        let entry_id = existing.entry_id();
        entries.update(entry_id, record).await?;
        drop(entries.schedule_reload(entry_id));

        tracing::info!(entry_id = %entry_id, "Existing entry updated, reload scheduled");
        return Ok(FlowResult::Abort {
            reason: AbortReason::ReauthSuccessful,
        });
    }

    let entry = entries.create(title, record).await;
    Ok(FlowResult::CreateEntry {
        title: entry.title().to_string(),
        entry,
    })
}
