// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account credentials and advanced options stages.

use crate::cloud::Credentials;
use crate::config::{FlowOptions, parse_network_range};
use crate::error::FlowError;
use crate::types::MobileApp;

use super::form::{AdvancedDefaults, UserDefaults};
use super::input::{AdvancedOptionsInput, UserInput, non_blank};
use super::session::FlowSession;
use super::step::{NextStep, StepId};

/// Resolves account credentials from the `user` step.
///
/// Blank username and password fall back to the configured placeholders.
/// The mobile app profile selects the application key and id. The user
/// step starts the session over, so nothing from an earlier attempt
/// survives.
///
/// # Errors
///
/// Returns `FlowError::InvalidAppName` if the profile is not supported.
pub fn submit_user<S>(
    input: &UserInput,
    options: &FlowOptions,
) -> Result<(FlowSession<S>, NextStep), FlowError> {
    let app_name = non_blank(input.mobile_app.as_ref()).unwrap_or(options.default_app());
    let app = MobileApp::lookup(app_name)?;

    let credentials = Credentials {
        username: non_blank(input.username.as_ref())
            .unwrap_or(options.default_username())
            .to_string(),
        password: non_blank(input.password.as_ref())
            .unwrap_or(options.default_password())
            .to_string(),
        appkey: app.appkey.to_string(),
        appid: app.appid,
    };

    let next = if input.advanced_options {
        NextStep::ShowForm(StepId::AdvancedOptions)
    } else {
        NextStep::RunDiscovery
    };

    let session = FlowSession {
        credentials: Some(credentials),
        advanced_options_enabled: input.advanced_options,
        ..FlowSession::new()
    };
    Ok((session, next))
}

/// Applies custom application credentials and the network range.
///
/// # Errors
///
/// - `FlowError::InvalidState` if the account credentials were not
///   collected first, or advanced options were not requested.
/// - `FlowError::InvalidAppKey` if the application key or id is missing.
///   A key made only of whitespace counts as missing.
/// - `FlowError::InvalidIpRange` if the network range does not parse.
pub fn submit_advanced_options<S>(
    session: &FlowSession<S>,
    input: &AdvancedOptionsInput,
) -> Result<(FlowSession<S>, NextStep), FlowError> {
    let Some(current) = session.credentials.as_ref() else {
        return Err(FlowError::InvalidState(
            "advanced options submitted before account credentials".to_string(),
        ));
    };
    if !session.advanced_options_enabled {
        return Err(FlowError::InvalidState(
            "advanced options were not requested".to_string(),
        ));
    }

    let (Some(appkey), Some(appid)) = (non_blank(input.appkey.as_ref()), input.appid) else {
        return Err(FlowError::InvalidAppKey);
    };

    let network_range = match non_blank(input.network_range.as_ref()) {
        Some(range) => {
            parse_network_range(range)?;
            Some(range.to_string())
        }
        None => None,
    };

    let credentials = Credentials {
        username: non_blank(input.username.as_ref())
            .map_or_else(|| current.username.clone(), String::from),
        password: non_blank(input.password.as_ref())
            .map_or_else(|| current.password.clone(), String::from),
        appkey: appkey.to_string(),
        appid,
    };

    let session = FlowSession {
        credentials: Some(credentials),
        network_range,
        last_error_cause: None,
        ..session.clone()
    };
    Ok((session, NextStep::RunDiscovery))
}

/// Form values for the `user` step, echoing `input` when given.
pub(crate) fn user_defaults<'a>(
    input: Option<&'a UserInput>,
    options: &'a FlowOptions,
) -> UserDefaults<'a> {
    let field = |value: Option<&'a String>, fallback: &'a str| non_blank(value).unwrap_or(fallback);
    match input {
        Some(input) => UserDefaults {
            username: field(input.username.as_ref(), options.default_username()),
            password: field(input.password.as_ref(), options.default_password()),
            mobile_app: field(input.mobile_app.as_ref(), options.default_app()),
            advanced_options: input.advanced_options,
        },
        None => UserDefaults {
            username: options.default_username(),
            password: options.default_password(),
            mobile_app: options.default_app(),
            advanced_options: false,
        },
    }
}

/// Form values for the `advanced_options` step.
///
/// A fresh form is prefilled from the resolved credentials. After a failed
/// attempt the submitted values are echoed as they were.
pub(crate) fn advanced_defaults<'a, S>(
    session: &'a FlowSession<S>,
    input: Option<&'a AdvancedOptionsInput>,
    options: &'a FlowOptions,
) -> AdvancedDefaults<'a> {
    let credentials = session.credentials.as_ref();
    let username = credentials.map_or(options.default_username(), |c| c.username.as_str());
    let password = credentials.map_or(options.default_password(), |c| c.password.as_str());

    match input {
        Some(input) => AdvancedDefaults {
            username: non_blank(input.username.as_ref()).unwrap_or(username),
            password: non_blank(input.password.as_ref()).unwrap_or(password),
            appkey: input.appkey.as_deref(),
            appid: input.appid,
            network_range: input.network_range.as_deref().unwrap_or_default(),
        },
        None => AdvancedDefaults {
            username,
            password,
            appkey: credentials.map(|c| c.appkey.as_str()),
            appid: credentials.map(|c| c.appid),
            network_range: session.network_range.as_deref().unwrap_or_default(),
        },
    }
}
