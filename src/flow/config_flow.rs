// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The setup flow driver.

use std::net::Ipv4Addr;

use serde_json::Value;

use crate::cloud::CloudService;
use crate::config::FlowOptions;
use crate::entries::ConfigEntries;
use crate::error::{Error, FlowError, Result};
use crate::state::ApplianceState;

use super::form::{self, FormDescriptor};
use super::input::{AdvancedOptionsInput, UnreachableApplianceInput, UserInput};
use super::session::FlowSession;
use super::step::{AbortReason, FlowResult, FlowSource, NextStep, StepId};
use super::{credentials, discovery, reconcile, unreachable};

/// Drives one setup flow from the first form to a stored entry.
///
/// Each `step_*` method handles one display (`None`) or submission
/// (`Some`) of a form and returns what to show next. Recoverable failures
/// redisplay the same form with the submitted values, the error code under
/// `base` and the cause placeholder; they never return `Err`. Only fatal
/// errors (`unexpected_state`, `invalid_state`) and storage failures do.
///
/// The two cloud calls are the only suspension points with real I/O.
///
/// # Examples
///
/// ```ignore
/// use midea_dehumidifier_lan::entries::ConfigEntries;
/// use midea_dehumidifier_lan::flow::{ConfigFlow, UserInput};
///
/// let mut flow = ConfigFlow::user(cloud, ConfigEntries::new());
/// let form = flow.step_user(None).await?;
///
/// let next = flow
///     .step_user(Some(UserInput::new("me@example.com", "secret")))
///     .await?;
/// ```
#[derive(Debug)]
pub struct ConfigFlow<C: CloudService> {
    cloud: C,
    entries: ConfigEntries,
    options: FlowOptions,
    source: FlowSource,
    session: FlowSession<C::Session>,
}

impl<C: CloudService> ConfigFlow<C> {
    /// Creates a flow started from `source`.
    #[must_use]
    pub fn new(cloud: C, entries: ConfigEntries, source: FlowSource) -> Self {
        Self {
            cloud,
            entries,
            options: FlowOptions::default(),
            source,
            session: FlowSession::new(),
        }
    }

    /// Creates a flow started by the user adding the integration.
    #[must_use]
    pub fn user(cloud: C, entries: ConfigEntries) -> Self {
        Self::new(cloud, entries, FlowSource::User)
    }

    /// Creates a reauthentication flow for an existing account.
    #[must_use]
    pub fn reauth(cloud: C, entries: ConfigEntries) -> Self {
        Self::new(cloud, entries, FlowSource::Reauth)
    }

    /// Replaces the flow options.
    #[must_use]
    pub fn with_options(mut self, options: FlowOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the committed session.
    #[must_use]
    pub fn session(&self) -> &FlowSession<C::Session> {
        &self.session
    }

    /// Returns how the flow was started.
    #[must_use]
    pub fn source(&self) -> FlowSource {
        self.source
    }

    // ========================================================================
    // Steps
    // ========================================================================

    /// Handles the `user` step.
    ///
    /// # Errors
    ///
    /// Returns an error only for fatal flow errors or storage failures.
    pub async fn step_user(&mut self, input: Option<UserInput>) -> Result<FlowResult> {
        self.session.last_error_cause = None;
        if let Some(abort) = self.single_instance_guard().await {
            return Ok(abort);
        }
        let Some(input) = input else {
            return Ok(FlowResult::Form(self.user_form(None)));
        };

        let outcome = match credentials::submit_user(&input, &self.options) {
            Ok((session, next)) => {
                self.session = session;
                self.advance(next).await
            }
            Err(err) => Err(err.into()),
        };
        self.recover(outcome, |flow| Ok(flow.user_form(Some(&input))))
    }

    /// Handles the `advanced_options` step.
    ///
    /// # Errors
    ///
    /// Returns `Error::Flow` with `invalid_state` if the user step did not
    /// run first, or a storage failure.
    pub async fn step_advanced_options(
        &mut self,
        input: Option<AdvancedOptionsInput>,
    ) -> Result<FlowResult> {
        self.session.last_error_cause = None;
        let Some(input) = input else {
            return Ok(FlowResult::Form(self.advanced_options_form(None)));
        };

        let outcome = match credentials::submit_advanced_options(&self.session, &input) {
            Ok((session, next)) => {
                self.session = session;
                self.advance(next).await
            }
            Err(err) => Err(err.into()),
        };
        self.recover(outcome, |flow| Ok(flow.advanced_options_form(Some(&input))))
    }

    /// Handles the `unreachable_appliance` step.
    ///
    /// # Errors
    ///
    /// Returns `Error::Flow` with `invalid_state` if no appliance is waiting
    /// for configuration, or a storage failure.
    pub async fn step_unreachable_appliance(
        &mut self,
        input: Option<UnreachableApplianceInput>,
    ) -> Result<FlowResult> {
        self.session.last_error_cause = None;
        let Some(input) = input else {
            let form = self.unreachable_appliance_form(None).inspect_err(|err| {
                tracing::error!(error = %err, "Aborting setup flow");
            })?;
            return Ok(FlowResult::Form(form));
        };

        let outcome = self.submit_unreachable(&input).await;
        self.recover(outcome, |flow| flow.unreachable_appliance_form(Some(&input)))
    }

    /// Handles a raw submission for the step named `step_id`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if `input` does not match the step's
    /// fields, `Error::Flow` with `invalid_state` for an unknown step, or
    /// any error of the step itself.
    pub async fn handle(&mut self, step_id: &str, input: Option<Value>) -> Result<FlowResult> {
        let step = step_id.parse::<StepId>().map_err(|reason| {
            tracing::error!(step_id, "Unknown setup step");
            FlowError::InvalidState(reason)
        })?;

        match step {
            StepId::User => {
                let input = input.map(serde_json::from_value).transpose()?;
                self.step_user(input).await
            }
            StepId::AdvancedOptions => {
                let input = input.map(serde_json::from_value).transpose()?;
                self.step_advanced_options(input).await
            }
            StepId::UnreachableAppliance => {
                let input = input.map(serde_json::from_value).transpose()?;
                self.step_unreachable_appliance(input).await
            }
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    async fn advance(&mut self, mut next: NextStep) -> Result<FlowResult> {
        loop {
            next = match next {
                NextStep::ShowForm(step) => return Ok(FlowResult::Form(self.fresh_form(step)?)),
                NextStep::RunDiscovery => self.run_discovery().await?,
                NextStep::Reconcile => return self.reconcile().await,
            };
        }
    }

    async fn run_discovery(&mut self) -> Result<NextStep> {
        let request = discovery::discovery_request(&self.session)?;
        tracing::info!(
            username = %request.credentials.username,
            networks = request.networks.len(),
            "Starting appliance discovery"
        );

        let found = self
            .cloud
            .authenticate_and_list(&request)
            .await
            .map_err(FlowError::from)?;
        let (session, next) = discovery::apply_discovery(&self.session, found);

        tracing::info!(
            appliances = session.appliances().len(),
            unreachable = session
                .appliances()
                .iter()
                .filter(|a| a.address.is_unresolved())
                .count(),
            "Appliance discovery finished"
        );
        self.session = session;
        Ok(next)
    }

    async fn submit_unreachable(&mut self, input: &UnreachableApplianceInput) -> Result<FlowResult> {
        let pending = unreachable::prepare_submission(&self.session, input)?;
        let report = match pending.probe_address {
            Some(address) => self.probe(address).await?,
            None => None,
        };
        let confirmed = unreachable::confirm_probe(pending, report)?;

        let (session, next) = unreachable::commit_appliance(&self.session, confirmed);
        self.session = session;
        self.advance(next).await
    }

    async fn probe(&self, address: Ipv4Addr) -> Result<Option<ApplianceState>> {
        let Some(cloud_session) = self.session.cloud_session.clone() else {
            let reason = "appliance probe without a cloud session".to_string();
            return Err(FlowError::InvalidState(reason).into());
        };

        match self.cloud.probe(address, &cloud_session).await {
            Ok(report) => Ok(report),
            Err(err) => {
                tracing::warn!(%address, error = %err, "Appliance probe failed");
                Ok(None)
            }
        }
    }

    async fn reconcile(&self) -> Result<FlowResult> {
        let record = reconcile::build_record(&self.session)?;
        tracing::info!(
            username = %record.username,
            devices = record.devices.len(),
            "Storing configuration entry"
        );
        reconcile::store_record(&self.entries, self.options.title(), record).await
    }

    async fn single_instance_guard(&self) -> Option<FlowResult> {
        if self.source != FlowSource::User || !self.options.single_instance() {
            return None;
        }
        if self.entries.is_empty().await {
            return None;
        }
        tracing::info!("Integration already configured");
        Some(FlowResult::Abort {
            reason: AbortReason::SingleInstanceAllowed,
        })
    }

    /// Turns recoverable flow errors into a redisplayed form.
    fn recover(
        &mut self,
        outcome: Result<FlowResult>,
        form: impl FnOnce(&Self) -> Result<FormDescriptor>,
    ) -> Result<FlowResult> {
        match outcome {
            Err(Error::Flow(err)) if !err.is_fatal() => {
                tracing::warn!(code = err.code(), cause = ?err.cause(), "Setup step failed");
                self.session.last_error_cause = err.cause();
                Ok(FlowResult::Form(form(&*self)?.with_error(Some(&err))))
            }
            Err(Error::Flow(err)) => {
                tracing::error!(code = err.code(), error = %err, "Aborting setup flow");
                Err(Error::Flow(err))
            }
            other => other,
        }
    }

    // ========================================================================
    // Forms
    // ========================================================================

    fn fresh_form(&self, step: StepId) -> Result<FormDescriptor> {
        match step {
            StepId::User => Ok(self.user_form(None)),
            StepId::AdvancedOptions => Ok(self.advanced_options_form(None)),
            StepId::UnreachableAppliance => self.unreachable_appliance_form(None),
        }
    }

    fn user_form(&self, input: Option<&UserInput>) -> FormDescriptor {
        form::user_form(
            &credentials::user_defaults(input, &self.options),
            self.session.last_error_cause(),
        )
    }

    fn advanced_options_form(&self, input: Option<&AdvancedOptionsInput>) -> FormDescriptor {
        form::advanced_options_form(
            &credentials::advanced_defaults(&self.session, input, &self.options),
            self.session.last_error_cause(),
        )
    }

    fn unreachable_appliance_form(
        &self,
        input: Option<&UnreachableApplianceInput>,
    ) -> Result<FormDescriptor> {
        let appliance = self.session.current_unreachable().ok_or_else(|| {
            FlowError::InvalidState("no unreachable appliance is being configured".to_string())
        })?;
        Ok(form::unreachable_appliance_form(
            appliance,
            &unreachable::unreachable_defaults(appliance, input),
            self.session.last_error_cause(),
        ))
    }
}
