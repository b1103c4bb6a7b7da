// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative form descriptors rendered by the host.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::appliance::ApplianceRecord;
use crate::config::{
    CONF_ADVANCED_OPTIONS, CONF_APPID, CONF_APPKEY, CONF_IGNORE_APPLIANCE, CONF_IP_ADDRESS,
    CONF_MOBILE_APP, CONF_NAME, CONF_NETWORK_RANGE, CONF_PASSWORD, CONF_TOKEN, CONF_TOKEN_KEY,
    CONF_USERNAME, IGNORED_IP_ADDRESS, NAME, TAG_CAUSE, TAG_ID, TAG_INTEGRATION, TAG_NAME,
};
use crate::error::FlowError;
use crate::types::MobileApp;

use super::step::StepId;

/// Key of the form-wide error.
pub const BASE_ERROR: &str = "base";

/// Value type of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    String,
    /// Integer.
    Integer,
    /// Checkbox.
    Boolean,
    /// One of a fixed list of values.
    Select(Vec<String>),
}

/// A field of a form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    default: Option<Value>,
}

impl FormField {
    fn new(name: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            kind,
            required,
            default: None,
        }
    }

    fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn with_optional_default<T: Into<Value>>(mut self, default: Option<T>) -> Self {
        self.default = default.map(Into::into);
        self
    }

    /// Returns the field identifier.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value type.
    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Returns `true` if the field must be filled in.
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// Returns the prefilled value.
    #[must_use]
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// A form to display for a step.
///
/// Carries the ordered fields with their prefilled values, the error of the
/// last attempt under the `base` key, and the description placeholders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescriptor {
    step_id: StepId,
    fields: Vec<FormField>,
    errors: BTreeMap<String, String>,
    placeholders: BTreeMap<String, String>,
}

impl FormDescriptor {
    fn new(step_id: StepId, fields: Vec<FormField>, cause: Option<&str>) -> Self {
        let placeholders = BTreeMap::from([
            (TAG_CAUSE.to_string(), cause.unwrap_or_default().to_string()),
            (TAG_INTEGRATION.to_string(), NAME.to_string()),
        ]);
        Self {
            step_id,
            fields,
            errors: BTreeMap::new(),
            placeholders,
        }
    }

    pub(crate) fn with_error(mut self, error: Option<&FlowError>) -> Self {
        if let Some(error) = error {
            self.errors
                .insert(BASE_ERROR.to_string(), error.code().to_string());
        }
        self
    }

    fn with_appliance(mut self, appliance: &ApplianceRecord) -> Self {
        self.placeholders
            .insert(TAG_ID.to_string(), appliance.id.clone());
        self.placeholders
            .insert(TAG_NAME.to_string(), appliance.name.clone());
        self
    }

    /// Returns the step this form belongs to.
    #[must_use]
    pub fn step_id(&self) -> StepId {
        self.step_id
    }

    /// Returns the fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Returns the field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the prefilled value of the named field.
    #[must_use]
    pub fn default_of(&self, name: &str) -> Option<&Value> {
        self.field(name).and_then(FormField::default)
    }

    /// Returns the errors keyed by field, `base` for form-wide errors.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Returns the form-wide error code.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.errors.get(BASE_ERROR).map(String::as_str)
    }

    /// Returns the description placeholders.
    #[must_use]
    pub fn placeholders(&self) -> &BTreeMap<String, String> {
        &self.placeholders
    }

    /// Returns one description placeholder.
    #[must_use]
    pub fn placeholder(&self, tag: &str) -> Option<&str> {
        self.placeholders.get(tag).map(String::as_str)
    }
}

/// Prefilled values of the `user` form.
pub(crate) struct UserDefaults<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub mobile_app: &'a str,
    pub advanced_options: bool,
}

pub(crate) fn user_form(defaults: &UserDefaults<'_>, cause: Option<&str>) -> FormDescriptor {
    let apps = MobileApp::names().into_iter().map(String::from).collect();
    FormDescriptor::new(
        StepId::User,
        vec![
            FormField::new(CONF_USERNAME, FieldKind::String, true).with_default(defaults.username),
            FormField::new(CONF_PASSWORD, FieldKind::String, true).with_default(defaults.password),
            FormField::new(CONF_MOBILE_APP, FieldKind::Select(apps), false)
                .with_default(defaults.mobile_app),
            FormField::new(CONF_ADVANCED_OPTIONS, FieldKind::Boolean, true)
                .with_default(defaults.advanced_options),
        ],
        cause,
    )
}

/// Prefilled values of the `advanced_options` form.
pub(crate) struct AdvancedDefaults<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub appkey: Option<&'a str>,
    pub appid: Option<u32>,
    pub network_range: &'a str,
}

pub(crate) fn advanced_options_form(
    defaults: &AdvancedDefaults<'_>,
    cause: Option<&str>,
) -> FormDescriptor {
    FormDescriptor::new(
        StepId::AdvancedOptions,
        vec![
            FormField::new(CONF_USERNAME, FieldKind::String, true).with_default(defaults.username),
            FormField::new(CONF_PASSWORD, FieldKind::String, true).with_default(defaults.password),
            FormField::new(CONF_APPKEY, FieldKind::String, true)
                .with_optional_default(defaults.appkey),
            FormField::new(CONF_APPID, FieldKind::Integer, true)
                .with_optional_default(defaults.appid),
            FormField::new(CONF_NETWORK_RANGE, FieldKind::String, false)
                .with_default(defaults.network_range),
        ],
        cause,
    )
}

/// Prefilled values of the `unreachable_appliance` form.
pub(crate) struct UnreachableDefaults<'a> {
    pub ignore_appliance: bool,
    pub ip_address: &'a str,
    pub name: &'a str,
    pub token: Option<&'a str>,
    pub token_key: Option<&'a str>,
}

impl<'a> UnreachableDefaults<'a> {
    /// Defaults for an appliance shown for the first time.
    pub(crate) fn fresh(appliance: &'a ApplianceRecord) -> Self {
        Self {
            ignore_appliance: false,
            ip_address: IGNORED_IP_ADDRESS,
            name: &appliance.name,
            token: None,
            token_key: None,
        }
    }
}

pub(crate) fn unreachable_appliance_form(
    appliance: &ApplianceRecord,
    defaults: &UnreachableDefaults<'_>,
    cause: Option<&str>,
) -> FormDescriptor {
    FormDescriptor::new(
        StepId::UnreachableAppliance,
        vec![
            FormField::new(CONF_IGNORE_APPLIANCE, FieldKind::Boolean, true)
                .with_default(defaults.ignore_appliance),
            FormField::new(CONF_IP_ADDRESS, FieldKind::String, false)
                .with_default(defaults.ip_address),
            FormField::new(CONF_NAME, FieldKind::String, false).with_default(defaults.name),
            FormField::new(CONF_TOKEN, FieldKind::String, false)
                .with_optional_default(defaults.token),
            FormField::new(CONF_TOKEN_KEY, FieldKind::String, false)
                .with_optional_default(defaults.token_key),
        ],
        cause,
    )
    .with_appliance(appliance)
}
