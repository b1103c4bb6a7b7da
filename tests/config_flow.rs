// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests driving whole setup flows against a scripted cloud.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};

use midea_dehumidifier_lan::appliance::ApplianceRecord;
use midea_dehumidifier_lan::cloud::{
    BlockingCloud, BlockingCloudService, CloudService, Discovery, DiscoveryRequest,
};
use midea_dehumidifier_lan::config::{ConfigurationRecord, FlowOptions};
use midea_dehumidifier_lan::entries::ConfigEntries;
use midea_dehumidifier_lan::error::{CloudError, Error, FlowError};
use midea_dehumidifier_lan::event::EntryEvent;
use midea_dehumidifier_lan::flow::{
    AbortReason, AdvancedOptionsInput, ConfigFlow, FlowResult, StepId, UnreachableApplianceInput,
    UserInput,
};
use midea_dehumidifier_lan::state::ApplianceState;

// ============================================================================
// Scripted cloud
// ============================================================================

#[derive(Default)]
struct Script {
    auth_error: Option<CloudError>,
    appliances: Vec<ApplianceRecord>,
    reachable: HashMap<Ipv4Addr, ApplianceState>,
    requests: Vec<DiscoveryRequest>,
    probes: Vec<Ipv4Addr>,
}

/// Cloud returning a fixed inventory; clones share the recorded calls.
#[derive(Clone, Default)]
struct ScriptedCloud(Arc<Mutex<Script>>);

impl ScriptedCloud {
    fn with_appliances(appliances: Vec<ApplianceRecord>) -> Self {
        let cloud = Self::default();
        cloud.0.lock().appliances = appliances;
        cloud
    }

    fn reachable(self, address: Ipv4Addr, state: ApplianceState) -> Self {
        self.0.lock().reachable.insert(address, state);
        self
    }

    fn rejecting(self, code: i64, message: &str) -> Self {
        self.0.lock().auth_error = Some(CloudError::Authentication {
            code,
            message: message.to_string(),
        });
        self
    }

    fn accept(&self) {
        self.0.lock().auth_error = None;
    }

    fn requests(&self) -> Vec<DiscoveryRequest> {
        self.0.lock().requests.clone()
    }

    fn probes(&self) -> Vec<Ipv4Addr> {
        self.0.lock().probes.clone()
    }
}

impl CloudService for ScriptedCloud {
    type Session = String;

    async fn authenticate_and_list(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<Discovery<String>, CloudError> {
        let mut script = self.0.lock();
        script.requests.push(request.clone());
        if let Some(err) = script.auth_error.clone() {
            return Err(err);
        }
        Ok(Discovery {
            session: format!("session-{}", request.credentials.username),
            appliances: script.appliances.clone(),
        })
    }

    async fn probe(
        &self,
        address: Ipv4Addr,
        session: &String,
    ) -> Result<Option<ApplianceState>, CloudError> {
        assert!(session.starts_with("session-"));
        let mut script = self.0.lock();
        script.probes.push(address);
        Ok(script.reachable.get(&address).cloned())
    }
}

fn ip(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(10, 0, 0, last)
}

fn found(id: &str, last: u8) -> ApplianceRecord {
    ApplianceRecord::new(id, format!("Dehumidifier {id}"), "0xA1").with_address(ip(last))
}

fn missing(id: &str) -> ApplianceRecord {
    ApplianceRecord::new(id, format!("Dehumidifier {id}"), "0xA1")
}

fn credentials() -> UserInput {
    UserInput::new("u1", "p1").with_mobile_app("NetHome")
}

fn stored(result: &FlowResult) -> &ConfigurationRecord {
    result
        .created_entry()
        .map(|entry| entry.data())
        .expect("flow should have created an entry")
}

fn device_ids(record: &ConfigurationRecord) -> Vec<&str> {
    record.devices.iter().map(|d| d.id.as_str()).collect()
}

// ============================================================================
// Credentials and discovery
// ============================================================================

mod credentials_stage {
    use super::*;

    #[tokio::test]
    async fn first_display_shows_placeholders() {
        let mut flow = ConfigFlow::user(ScriptedCloud::default(), ConfigEntries::new());

        let result = flow.step_user(None).await.unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::User);
        assert_eq!(form.default_of("username"), Some(&json!("your.account@example.com")));
        assert_eq!(form.default_of("password"), Some(&json!("password")));
        assert_eq!(form.default_of("mobile_app"), Some(&json!("NetHome")));
        assert_eq!(form.default_of("advanced_options"), Some(&json!(false)));
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn nethome_credentials_reach_discovery() {
        let cloud = ScriptedCloud::default();
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow.step_user(Some(credentials())).await.unwrap();

        let requests = cloud.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.credentials.username, "u1");
        assert_eq!(request.credentials.password, "p1");
        assert_eq!(request.credentials.appkey, "3742e9e5842d4ad59c2db887e12449f9");
        assert_eq!(request.credentials.appid, 1017);
        assert!(request.networks.is_empty());

        let record = stored(&result);
        assert_eq!(record.appkey, "3742e9e5842d4ad59c2db887e12449f9");
        assert!(record.network_range.is_none());
    }

    #[tokio::test]
    async fn unknown_app_redisplays_with_submitted_values() {
        let cloud = ScriptedCloud::default();
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow
            .step_user(Some(UserInput::new("u1", "p1").with_mobile_app("Carrier")))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::User);
        assert_eq!(form.error(), Some("invalid_app_name"));
        assert_eq!(form.placeholder("cause"), Some("Carrier"));
        assert_eq!(form.default_of("username"), Some(&json!("u1")));
        assert_eq!(form.default_of("mobile_app"), Some(&json!("Carrier")));
        assert!(cloud.requests().is_empty());
    }

    #[tokio::test]
    async fn rejected_login_shows_code_and_message() {
        let cloud = ScriptedCloud::default().rejecting(3106, "invalid password");
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow.step_user(Some(credentials())).await.unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::User);
        assert_eq!(form.error(), Some("invalid_auth"));
        assert_eq!(form.placeholder("cause"), Some("3106 - invalid password"));
        assert_eq!(form.default_of("password"), Some(&json!("p1")));
        assert_eq!(flow.session().last_error_cause(), Some("3106 - invalid password"));

        // no automatic retry; the user resubmits
        cloud.accept();
        let result = flow.step_user(Some(credentials())).await.unwrap();
        assert!(result.created_entry().is_some());
        assert_eq!(cloud.requests().len(), 2);
    }

    #[tokio::test]
    async fn unreachable_cloud_is_recoverable() {
        struct Offline;

        impl CloudService for Offline {
            type Session = ();

            async fn authenticate_and_list(
                &self,
                _request: &DiscoveryRequest,
            ) -> Result<Discovery<()>, CloudError> {
                Err(CloudError::Unavailable("dns lookup failed".to_string()))
            }

            async fn probe(
                &self,
                _address: Ipv4Addr,
                _session: &(),
            ) -> Result<Option<ApplianceState>, CloudError> {
                Ok(None)
            }
        }

        let mut flow = ConfigFlow::user(Offline, ConfigEntries::new());
        let result = flow.step_user(Some(credentials())).await.unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.error(), Some("no_cloud"));
        assert_eq!(form.placeholder("cause"), Some("dns lookup failed"));
    }
}

// ============================================================================
// Advanced options
// ============================================================================

mod advanced_options {
    use super::*;

    async fn on_advanced_form(cloud: &ScriptedCloud) -> ConfigFlow<ScriptedCloud> {
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());
        let result = flow
            .step_user(Some(credentials().with_advanced_options()))
            .await
            .unwrap();
        assert_eq!(result.step_id(), Some(StepId::AdvancedOptions));
        flow
    }

    #[tokio::test]
    async fn form_is_prefilled_from_resolved_credentials() {
        let cloud = ScriptedCloud::default();
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow
            .step_user(Some(
                UserInput::new("u1", "p1")
                    .with_mobile_app("MideaAir")
                    .with_advanced_options(),
            ))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.default_of("username"), Some(&json!("u1")));
        assert_eq!(form.default_of("appkey"), Some(&json!("ff0cf6f5f0c3471de36341cab3f7a9af")));
        assert_eq!(form.default_of("appid"), Some(&json!(1117)));
        assert_eq!(form.default_of("network_range"), Some(&json!("")));
        assert!(cloud.requests().is_empty());
    }

    #[tokio::test]
    async fn custom_app_and_network_reach_discovery() {
        let cloud = ScriptedCloud::default();
        let mut flow = on_advanced_form(&cloud).await;

        let result = flow
            .step_advanced_options(Some(AdvancedOptionsInput {
                username: None,
                password: Some("p2".to_string()),
                appkey: Some("0123456789abcdef".to_string()),
                appid: Some(2000),
                network_range: Some("192.168.1.77/24".to_string()),
            }))
            .await
            .unwrap();

        let request = &cloud.requests()[0];
        assert_eq!(request.credentials.username, "u1");
        assert_eq!(request.credentials.password, "p2");
        assert_eq!(request.credentials.appkey, "0123456789abcdef");
        assert_eq!(request.credentials.appid, 2000);
        assert_eq!(request.networks.len(), 1);
        assert_eq!(request.networks[0].network(), Ipv4Addr::new(192, 168, 1, 0));

        let record = stored(&result);
        assert_eq!(record.password, "p2");
        assert_eq!(record.appid, 2000);
        assert_eq!(record.network_range.as_deref(), Some("192.168.1.77/24"));
    }

    #[tokio::test]
    async fn missing_appid_keeps_submitted_values() {
        let cloud = ScriptedCloud::default();
        let mut flow = on_advanced_form(&cloud).await;

        let result = flow
            .step_advanced_options(Some(AdvancedOptionsInput {
                appkey: Some("0123456789abcdef".to_string()),
                appid: None,
                ..AdvancedOptionsInput::default()
            }))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::AdvancedOptions);
        assert_eq!(form.error(), Some("invalid_appkey"));
        assert_eq!(form.default_of("appkey"), Some(&json!("0123456789abcdef")));
        assert_eq!(form.default_of("appid"), None);
        assert!(cloud.requests().is_empty());
    }

    #[tokio::test]
    async fn bad_network_range_is_reported() {
        let cloud = ScriptedCloud::default();
        let mut flow = on_advanced_form(&cloud).await;

        let result = flow
            .step_advanced_options(Some(AdvancedOptionsInput {
                appkey: Some("k".to_string()),
                appid: Some(1017),
                network_range: Some("192.168.1.0/99".to_string()),
                ..AdvancedOptionsInput::default()
            }))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.error(), Some("invalid_ip_range"));
        assert_eq!(form.placeholder("cause"), Some("192.168.1.0/99"));
        assert_eq!(form.default_of("network_range"), Some(&json!("192.168.1.0/99")));
    }

    #[tokio::test]
    async fn rejected_login_returns_to_advanced_form() {
        let cloud = ScriptedCloud::default().rejecting(3004, "value is illegal");
        let mut flow = on_advanced_form(&cloud).await;

        let result = flow
            .step_advanced_options(Some(AdvancedOptionsInput {
                appkey: Some("k".to_string()),
                appid: Some(1017),
                ..AdvancedOptionsInput::default()
            }))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::AdvancedOptions);
        assert_eq!(form.error(), Some("invalid_auth"));
        assert_eq!(form.placeholder("cause"), Some("3004 - value is illegal"));
    }

    #[tokio::test]
    async fn advanced_submission_without_user_step_aborts() {
        let mut flow = ConfigFlow::user(ScriptedCloud::default(), ConfigEntries::new());

        let err = flow
            .step_advanced_options(Some(AdvancedOptionsInput {
                appkey: Some("k".to_string()),
                appid: Some(1),
                ..AdvancedOptionsInput::default()
            }))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Flow(FlowError::InvalidState(_))));
    }
}

// ============================================================================
// Unreachable appliances
// ============================================================================

mod unreachable_appliances {
    use super::*;

    #[tokio::test]
    async fn all_found_skips_the_stage() {
        let cloud = ScriptedCloud::with_appliances(vec![found("1", 11), found("2", 12)]);
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow.step_user(Some(credentials())).await.unwrap();

        assert_eq!(device_ids(stored(&result)), ["1", "2"]);
        assert!(cloud.probes().is_empty());
    }

    #[tokio::test]
    async fn ignored_appliance_leaves_empty_device_list() {
        let cloud = ScriptedCloud::with_appliances(vec![missing("1")]);
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow.step_user(Some(credentials())).await.unwrap();
        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::UnreachableAppliance);
        assert_eq!(form.placeholder("id"), Some("1"));
        assert_eq!(form.placeholder("name"), Some("Dehumidifier 1"));
        assert_eq!(form.default_of("ip_address"), Some(&json!("0.0.0.0")));

        let result = flow
            .step_unreachable_appliance(Some(UnreachableApplianceInput {
                ignore_appliance: true,
                ip_address: Some(String::new()),
                ..UnreachableApplianceInput::default()
            }))
            .await
            .unwrap();

        assert!(stored(&result).devices.is_empty());
        assert!(flow.session().appliances()[0].address.is_ignored());
        assert!(cloud.probes().is_empty());
    }

    #[tokio::test]
    async fn blank_address_without_ignore_flag_is_ignored() {
        let cloud = ScriptedCloud::with_appliances(vec![missing("1"), found("2", 12)]);
        let mut flow = ConfigFlow::user(cloud, ConfigEntries::new());
        flow.step_user(Some(credentials())).await.unwrap();

        let result = flow
            .step_unreachable_appliance(Some(UnreachableApplianceInput {
                ignore_appliance: false,
                ip_address: Some("   ".to_string()),
                ..UnreachableApplianceInput::default()
            }))
            .await
            .unwrap();

        assert_eq!(device_ids(stored(&result)), ["2"]);
    }

    #[tokio::test]
    async fn not_found_keeps_cursor_and_input() {
        let cloud = ScriptedCloud::with_appliances(vec![missing("1")])
            .reachable(ip(6), ApplianceState::new().with_target_humidity(55));
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());
        flow.step_user(Some(credentials())).await.unwrap();

        let result = flow
            .step_unreachable_appliance(Some(
                UnreachableApplianceInput::address("10.0.0.5").with_credentials("tok", "key"),
            ))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.step_id(), StepId::UnreachableAppliance);
        assert_eq!(form.error(), Some("not_discovered"));
        assert_eq!(form.placeholder("cause"), Some("10.0.0.5"));
        assert_eq!(form.default_of("ip_address"), Some(&json!("10.0.0.5")));
        assert_eq!(form.default_of("token"), Some(&json!("tok")));
        assert_eq!(flow.session().current_unreachable_index(), Some(0));
        assert!(flow.session().appliances()[0].address.is_unresolved());
        assert!(flow.session().appliances()[0].token.is_empty());

        let result = flow
            .step_unreachable_appliance(Some(
                UnreachableApplianceInput::address("10.0.0.6").with_credentials("tok", "key"),
            ))
            .await
            .unwrap();

        let record = stored(&result);
        assert_eq!(record.devices[0].ip_address, ip(6));
        assert_eq!(record.devices[0].token, "tok");
        assert_eq!(record.devices[0].token_key, "key");
        assert_eq!(cloud.probes(), [ip(5), ip(6)]);
        assert_eq!(
            flow.session().appliances()[0]
                .state
                .as_ref()
                .and_then(ApplianceState::target_humidity),
            Some(55)
        );
    }

    #[tokio::test]
    async fn malformed_address_is_reported() {
        let cloud = ScriptedCloud::with_appliances(vec![missing("1")]);
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());
        flow.step_user(Some(credentials())).await.unwrap();

        let result = flow
            .step_unreachable_appliance(Some(UnreachableApplianceInput::address("10.0.0")))
            .await
            .unwrap();

        let form = result.form().unwrap();
        assert_eq!(form.error(), Some("invalid_ip_address"));
        assert_eq!(form.placeholder("cause"), Some("10.0.0"));
        assert!(cloud.probes().is_empty());
    }

    #[tokio::test]
    async fn each_unreachable_appliance_is_visited_once_in_order() {
        let cloud = ScriptedCloud::with_appliances(vec![
            missing("a"),
            found("b", 12),
            missing("c"),
            found("d", 14),
            missing("e"),
        ])
        .reachable(ip(13), ApplianceState::new());
        let mut flow = ConfigFlow::user(cloud, ConfigEntries::new());

        let mut visited = Vec::new();
        let mut result = flow.step_user(Some(credentials())).await.unwrap();
        while let Some(form) = result.form() {
            assert_eq!(form.step_id(), StepId::UnreachableAppliance);
            let id = form.placeholder("id").unwrap().to_string();
            let input = if id == "c" {
                UnreachableApplianceInput::address("10.0.0.13")
            } else {
                UnreachableApplianceInput::ignore()
            };
            visited.push(id);
            result = flow.step_unreachable_appliance(Some(input)).await.unwrap();
        }

        assert_eq!(visited, ["a", "c", "e"]);
        assert_eq!(device_ids(stored(&result)), ["b", "c", "d"]);
    }

    #[tokio::test]
    async fn later_failure_keeps_earlier_appliances() {
        let cloud = ScriptedCloud::with_appliances(vec![missing("1"), missing("2")])
            .reachable(ip(21), ApplianceState::new());
        let mut flow = ConfigFlow::user(cloud, ConfigEntries::new());
        flow.step_user(Some(credentials())).await.unwrap();

        flow.step_unreachable_appliance(Some(UnreachableApplianceInput {
            name: Some("Cellar".to_string()),
            ..UnreachableApplianceInput::address("10.0.0.21")
        }))
        .await
        .unwrap();
        let result = flow
            .step_unreachable_appliance(Some(UnreachableApplianceInput::address("10.0.0.22")))
            .await
            .unwrap();

        assert_eq!(result.form().unwrap().error(), Some("not_discovered"));
        let first = &flow.session().appliances()[0];
        assert_eq!(first.address.ip(), Some(ip(21)));
        assert_eq!(first.name, "Cellar");
        assert_eq!(flow.session().current_unreachable_index(), Some(1));
    }
}

// ============================================================================
// Entries
// ============================================================================

mod entries {
    use super::*;

    async fn existing_entry(entries: &ConfigEntries, username: &str) {
        let cloud = ScriptedCloud::default();
        let mut flow = ConfigFlow::user(cloud, entries.clone());
        let result = flow
            .step_user(Some(UserInput::new(username, "old-password")))
            .await
            .unwrap();
        assert!(result.created_entry().is_some());
    }

    #[tokio::test]
    async fn second_user_flow_is_refused() {
        let entries = ConfigEntries::new();
        existing_entry(&entries, "u1").await;

        let mut flow = ConfigFlow::user(ScriptedCloud::default(), entries.clone());
        let result = flow.step_user(None).await.unwrap();

        assert_eq!(result.abort_reason(), Some(AbortReason::SingleInstanceAllowed));
        assert_eq!(entries.len().await, 1);
    }

    #[tokio::test]
    async fn reauth_overwrites_and_reloads() {
        let entries = ConfigEntries::new();
        existing_entry(&entries, "u1").await;
        let original = entries.find_by_unique_id("u1").await.unwrap();
        let mut events = entries.subscribe();

        let cloud = ScriptedCloud::with_appliances(vec![found("1", 11)]);
        let mut flow = ConfigFlow::reauth(cloud, entries.clone());
        let result = flow.step_user(Some(credentials())).await.unwrap();

        assert_eq!(result.abort_reason(), Some(AbortReason::ReauthSuccessful));
        assert_eq!(entries.len().await, 1);

        let updated = entries.find_by_unique_id("u1").await.unwrap();
        assert_eq!(updated.entry_id(), original.entry_id());
        assert_eq!(updated.data().password, "p1");
        assert_eq!(device_ids(updated.data()), ["1"]);

        let id = original.entry_id();
        assert_eq!(events.recv().await.unwrap(), EntryEvent::updated(id));
        assert_eq!(events.recv().await.unwrap(), EntryEvent::reload_requested(id));
        assert_eq!(events.recv().await.unwrap(), EntryEvent::reloaded(id, 1));
    }

    #[tokio::test]
    async fn multiple_instances_when_allowed() {
        let entries = ConfigEntries::new();
        existing_entry(&entries, "u1").await;

        let mut flow = ConfigFlow::user(ScriptedCloud::default(), entries.clone())
            .with_options(FlowOptions::new().allow_multiple_instances().with_title("Upstairs"));
        let result = flow
            .step_user(Some(UserInput::new("u2", "p2")))
            .await
            .unwrap();

        assert_eq!(result.created_entry().unwrap().title(), "Upstairs");
        assert_eq!(entries.len().await, 2);
    }

    #[tokio::test]
    async fn created_entry_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");

        let entries = ConfigEntries::new();
        let cloud = ScriptedCloud::with_appliances(vec![found("1", 11), missing("2")]);
        let mut flow = ConfigFlow::user(cloud, entries.clone());
        flow.step_user(Some(credentials())).await.unwrap();
        flow.step_unreachable_appliance(Some(UnreachableApplianceInput::ignore()))
            .await
            .unwrap();
        entries.save_to(&path).await.unwrap();

        let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let data = &saved["entries"][0]["data"];
        assert_eq!(data["username"], "u1");
        assert_eq!(data["devices"][0]["ip_address"], "10.0.0.11");
        assert_eq!(data["devices"][0]["type"], "0xA1");

        let loaded = ConfigEntries::load_from(&path).await.unwrap();
        let entry = loaded.find_by_unique_id("u1").await.unwrap();
        assert_eq!(device_ids(entry.data()), ["1"]);
    }
}

// ============================================================================
// Raw submissions
// ============================================================================

mod raw_submissions {
    use super::*;

    #[tokio::test]
    async fn host_dictionaries_drive_the_whole_flow() {
        let cloud = ScriptedCloud::with_appliances(vec![missing("1")])
            .reachable(ip(5), ApplianceState::new().with_running(true));
        let mut flow = ConfigFlow::user(cloud.clone(), ConfigEntries::new());

        let result = flow.handle("user", None).await.unwrap();
        assert_eq!(result.step_id(), Some(StepId::User));

        let result = flow
            .handle(
                "user",
                Some(json!({
                    "username": "u1",
                    "password": "p1",
                    "mobile_app": "MideaAir",
                    "advanced_options": true
                })),
            )
            .await
            .unwrap();
        assert_eq!(result.step_id(), Some(StepId::AdvancedOptions));

        let result = flow
            .handle(
                "advanced_options",
                Some(json!({
                    "username": "u1",
                    "password": "p1",
                    "appkey": "ff0cf6f5f0c3471de36341cab3f7a9af",
                    "appid": 1117,
                    "network_range": ""
                })),
            )
            .await
            .unwrap();
        assert_eq!(result.step_id(), Some(StepId::UnreachableAppliance));

        let result = flow
            .handle(
                "unreachable_appliance",
                Some(json!({
                    "ignore_appliance": false,
                    "ip_address": "10.0.0.5",
                    "name": "Basement",
                    "token": "abc",
                    "token_key": "def"
                })),
            )
            .await
            .unwrap();

        let record = stored(&result);
        assert_eq!(record.appid, 1117);
        assert!(record.network_range.is_none());
        assert_eq!(record.devices[0].name, "Basement");
        assert_eq!(record.devices[0].ip_address, ip(5));
        assert_eq!(cloud.requests()[0].credentials.appid, 1117);
    }

    #[tokio::test]
    async fn wrong_field_type_is_invalid_input() {
        let mut flow = ConfigFlow::user(ScriptedCloud::default(), ConfigEntries::new());
        let err = flow
            .handle("user", Some(json!({ "advanced_options": "yes" })))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}

// ============================================================================
// Blocking collaborators
// ============================================================================

mod blocking_cloud {
    use super::*;

    /// Synchronous client answering for a single address.
    struct LanScanner;

    impl BlockingCloudService for LanScanner {
        type Session = u64;

        fn authenticate_and_list(
            &self,
            _request: &DiscoveryRequest,
        ) -> Result<Discovery<u64>, CloudError> {
            std::thread::sleep(std::time::Duration::from_millis(5));
            Ok(Discovery {
                session: 42,
                appliances: vec![missing("1")],
            })
        }

        fn probe(
            &self,
            address: Ipv4Addr,
            session: &u64,
        ) -> Result<Option<ApplianceState>, CloudError> {
            assert_eq!(*session, 42);
            Ok((address == ip(9)).then(ApplianceState::new))
        }
    }

    #[tokio::test]
    async fn blocking_client_completes_the_flow() {
        let mut flow = ConfigFlow::user(BlockingCloud::new(LanScanner), ConfigEntries::new());

        let result = flow.step_user(Some(credentials())).await.unwrap();
        assert_eq!(result.step_id(), Some(StepId::UnreachableAppliance));

        let result = flow
            .step_unreachable_appliance(Some(UnreachableApplianceInput::address("10.0.0.9")))
            .await
            .unwrap();

        assert_eq!(stored(&result).devices[0].ip_address, ip(9));
    }
}
