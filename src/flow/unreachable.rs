// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Manual configuration of appliances discovery could not reach.
//!
//! A submission goes through three phases. [`prepare_submission`] applies
//! the form onto a copy of the current record and decides whether the
//! device has to be probed. The flow awaits the probe and calls
//! [`confirm_probe`]. [`commit_appliance`] stores the record and moves the
//! cursor. Only the last phase produces a new session, so a failure in
//! either of the first two leaves the session as it was.

use std::net::Ipv4Addr;

use crate::appliance::{ApplianceAddress, ApplianceRecord};
use crate::error::FlowError;
use crate::state::ApplianceState;

use super::form::UnreachableDefaults;
use super::input::{UnreachableApplianceInput, non_blank};
use super::session::FlowSession;
use super::step::{NextStep, StepId};

/// A submitted appliance waiting for validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAppliance {
    /// Position of the appliance in the session.
    pub index: usize,
    /// The record with the submitted values applied.
    pub record: ApplianceRecord,
    /// Address to probe, `None` when the appliance is ignored.
    pub probe_address: Option<Ipv4Addr>,
}

/// Applies a submission to the appliance under the cursor.
///
/// A blank address, the `0.0.0.0` sentinel and the ignore flag all mark the
/// appliance as ignored, which needs no probe.
///
/// # Errors
///
/// - `FlowError::InvalidState` if no appliance is being configured.
/// - `FlowError::InvalidIpAddress` if the address is not an IPv4 address.
pub fn prepare_submission<S>(
    session: &FlowSession<S>,
    input: &UnreachableApplianceInput,
) -> Result<PendingAppliance, FlowError> {
    let (index, current) = session
        .cursor
        .and_then(|index| session.appliances.get(index).map(|record| (index, record)))
        .ok_or_else(|| {
            FlowError::InvalidState("no unreachable appliance is being configured".to_string())
        })?;

    let mut record = current.clone();
    if let Some(name) = non_blank(input.name.as_ref()) {
        record.name = name.to_string();
    }
    record.token = input.token.clone().unwrap_or_default();
    record.key = input.token_key.clone().unwrap_or_default();

    let address = match non_blank(input.ip_address.as_ref()) {
        Some(_) if input.ignore_appliance => ApplianceAddress::Ignored,
        None => ApplianceAddress::Ignored,
        Some(raw) => raw
            .parse::<Ipv4Addr>()
            .map(ApplianceAddress::from)
            .map_err(|_| FlowError::InvalidIpAddress(raw.to_string()))?,
    };

    let probe_address = address.ip();
    if probe_address.is_none() {
        tracing::debug!(appliance = %record.id, "Ignoring appliance");
        record.address = ApplianceAddress::Ignored;
    }

    Ok(PendingAppliance {
        index,
        record,
        probe_address,
    })
}

/// Completes a pending appliance with the probe result.
///
/// # Errors
///
/// Returns `FlowError::NotDiscovered` carrying the address if nothing
/// answered.
pub fn confirm_probe(
    mut pending: PendingAppliance,
    report: Option<ApplianceState>,
) -> Result<PendingAppliance, FlowError> {
    let Some(address) = pending.probe_address else {
        return Ok(pending);
    };
    let report = report.ok_or_else(|| FlowError::NotDiscovered(address.to_string()))?;

    pending.record.address = ApplianceAddress::Resolved(address);
    pending.record.merge_probe(&report);
    Ok(pending)
}

/// Stores a validated appliance and moves to the next unresolved one.
#[must_use]
pub fn commit_appliance<S>(
    session: &FlowSession<S>,
    pending: PendingAppliance,
) -> (FlowSession<S>, NextStep) {
    let mut next_session = FlowSession {
        last_error_cause: None,
        ..session.clone()
    };
    let index = pending.index;
    if let Some(slot) = next_session.appliances.get_mut(index) {
        *slot = pending.record;
    }

    next_session.cursor = next_session.next_unresolved(index + 1);
    tracing::debug!(from = index, to = ?next_session.cursor, "Advancing appliance cursor");

    let next = match next_session.cursor {
        Some(_) => NextStep::ShowForm(StepId::UnreachableAppliance),
        None => NextStep::Reconcile,
    };
    (next_session, next)
}

/// Form values for the `unreachable_appliance` step, echoing `input` when
/// given.
pub(crate) fn unreachable_defaults<'a>(
    appliance: &'a ApplianceRecord,
    input: Option<&'a UnreachableApplianceInput>,
) -> UnreachableDefaults<'a> {
    let Some(input) = input else {
        return UnreachableDefaults::fresh(appliance);
    };
    UnreachableDefaults {
        ignore_appliance: input.ignore_appliance,
        ip_address: input.ip_address.as_deref().unwrap_or_default(),
        name: non_blank(input.name.as_ref()).unwrap_or(&appliance.name),
        token: input.token.as_deref(),
        token_key: input.token_key.as_deref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(records: Vec<ApplianceRecord>, cursor: usize) -> FlowSession<()> {
        FlowSession {
            appliances: records,
            cursor: Some(cursor),
            ..FlowSession::new()
        }
    }

    fn two_unreachable() -> FlowSession<()> {
        session(
            vec![
                ApplianceRecord::new("1", "Basement", "0xA1"),
                ApplianceRecord::new("2", "Laundry", "0xA1")
                    .with_address(Ipv4Addr::new(10, 0, 0, 2)),
                ApplianceRecord::new("3", "Attic", "0xA1"),
            ],
            0,
        )
    }

    #[test]
    fn blank_address_is_ignored_whatever_the_flag() {
        for ignore_appliance in [true, false] {
            let input = UnreachableApplianceInput {
                ignore_appliance,
                ip_address: Some(String::new()),
                ..UnreachableApplianceInput::default()
            };
            let pending = prepare_submission(&two_unreachable(), &input).unwrap();
            assert_eq!(pending.record.address, ApplianceAddress::Ignored);
            assert!(pending.probe_address.is_none());
        }
    }

    #[test]
    fn sentinel_address_is_ignored() {
        let input = UnreachableApplianceInput::address("0.0.0.0");
        let pending = prepare_submission(&two_unreachable(), &input).unwrap();
        assert!(pending.record.address.is_ignored());
    }

    #[test]
    fn invalid_address_is_rejected() {
        let input = UnreachableApplianceInput::address("10.0.0.256");
        assert_eq!(
            prepare_submission(&two_unreachable(), &input).unwrap_err(),
            FlowError::InvalidIpAddress("10.0.0.256".to_string())
        );
    }

    #[test]
    fn submitted_fields_are_applied() {
        let input = UnreachableApplianceInput {
            name: Some("Cellar".to_string()),
            ..UnreachableApplianceInput::address("10.0.0.5").with_credentials("tok", "key")
        };
        let pending = prepare_submission(&two_unreachable(), &input).unwrap();

        assert_eq!(pending.index, 0);
        assert_eq!(pending.record.name, "Cellar");
        assert_eq!(pending.record.token, "tok");
        assert_eq!(pending.record.key, "key");
        assert_eq!(pending.probe_address, Some(Ipv4Addr::new(10, 0, 0, 5)));
        assert!(pending.record.address.is_unresolved());
    }

    #[test]
    fn missing_probe_answer_is_not_discovered() {
        let input = UnreachableApplianceInput::address("10.0.0.5");
        let pending = prepare_submission(&two_unreachable(), &input).unwrap();

        assert_eq!(
            confirm_probe(pending, None).unwrap_err(),
            FlowError::NotDiscovered("10.0.0.5".to_string())
        );
    }

    #[test]
    fn probe_answer_resolves_and_merges_state() {
        let input = UnreachableApplianceInput::address("10.0.0.5");
        let pending = prepare_submission(&two_unreachable(), &input).unwrap();

        let confirmed =
            confirm_probe(pending, Some(ApplianceState::new().with_target_humidity(50))).unwrap();

        assert_eq!(confirmed.record.address.ip(), Some(Ipv4Addr::new(10, 0, 0, 5)));
        assert_eq!(
            confirmed.record.state.as_ref().and_then(ApplianceState::target_humidity),
            Some(50)
        );
    }

    #[test]
    fn commit_skips_resolved_appliances() {
        let start = two_unreachable();
        let pending = prepare_submission(&start, &UnreachableApplianceInput::ignore()).unwrap();

        let (session, next) = commit_appliance(&start, pending);

        assert_eq!(next, NextStep::ShowForm(StepId::UnreachableAppliance));
        assert_eq!(session.current_unreachable_index(), Some(2));
        assert!(session.appliances()[0].address.is_ignored());
        // the committed session is untouched
        assert!(start.appliances()[0].address.is_unresolved());
    }

    #[test]
    fn commit_of_last_appliance_reconciles() {
        let start = session(
            vec![
                ApplianceRecord::new("1", "A", "0xA1").with_address(Ipv4Addr::UNSPECIFIED),
                ApplianceRecord::new("2", "B", "0xA1"),
            ],
            1,
        );
        let pending = prepare_submission(&start, &UnreachableApplianceInput::ignore()).unwrap();

        let (session, next) = commit_appliance(&start, pending);

        assert_eq!(next, NextStep::Reconcile);
        assert_eq!(session.current_unreachable_index(), None);
    }

    #[test]
    fn submission_without_cursor_is_invalid_state() {
        let input = UnreachableApplianceInput::ignore();
        let err = prepare_submission(&FlowSession::<()>::new(), &input).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn failed_attempt_echoes_submission() {
        let appliance = ApplianceRecord::new("1", "Basement", "0xA1");
        let input = UnreachableApplianceInput::address("10.0.0.5");
        let defaults = unreachable_defaults(&appliance, Some(&input));

        assert_eq!(defaults.ip_address, "10.0.0.5");
        assert_eq!(defaults.name, "Basement");
        assert!(!defaults.ignore_appliance);
    }
}
