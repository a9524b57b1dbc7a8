// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::mock::*;
use appsvc_app_service::{
    AppServiceApi, ConnectionStringEntry, EnvironmentVariable, ValueSource,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn var(name: &str, value: &str) -> EnvironmentVariable {
    appsvc_app_service::mapper::environment_variable(name, value)
}

#[tokio::test]
async fn test_get_environment_variables_uses_list_action() {
    let http = MockHttpSend::default().reply(
        200,
        &json!({"properties": {
            "b_setting": "two",
            "A_SETTING": "one",
            "DB": "@Microsoft.KeyVault(SecretUri=https://kv.vault.azure.net/secrets/db/)"
        }})
        .to_string(),
    );

    let vars = service(&http)
        .get_environment_variables("portal-api")
        .await
        .unwrap();

    let names: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["A_SETTING", "DB", "b_setting"]);
    assert_eq!(vars[1].source, ValueSource::KeyVaultReference);
    assert_eq!(
        http.request_lines(),
        vec![format!(
            "POST {SITE}/config/appsettings/list?api-version=2022-03-01"
        )]
    );
}

#[tokio::test]
async fn test_save_environment_variables_body() {
    let http = MockHttpSend::default().reply(200, "{}");

    service(&http)
        .save_environment_variables("portal-api", &[var("A", "1"), var("B", "2")])
        .await
        .unwrap();

    let sent = &http.requests()[0];
    assert_eq!(
        format!("{} {}", sent.method, sent.url),
        format!("PUT {SITE}/config/appsettings?api-version=2022-03-01")
    );
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(body, json!({"properties": {"A": "1", "B": "2"}}));
}

#[tokio::test]
async fn test_environment_variables_round_trip() {
    init_logger();
    let svc = service_with(SettingsStore::default(), config());
    let saved = vec![
        var("WEBSITE_TIME_ZONE", "UTC"),
        var("API_KEY", "@microsoft.keyvault(VaultName=kv;SecretName=api-key)"),
        var("EMPTY", ""),
    ];

    svc.save_environment_variables("portal-api", &saved)
        .await
        .unwrap();
    let loaded = svc.get_environment_variables("portal-api").await.unwrap();

    let mut expected = saved.clone();
    expected.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(loaded, expected);
    assert_eq!(loaded[0].name, "API_KEY");
    assert_eq!(loaded[0].source, ValueSource::KeyVaultReference);
    assert!(loaded[0].is_value_hidden);
}

#[tokio::test]
async fn test_connection_strings() {
    let http = MockHttpSend::default()
        .reply(
            200,
            &json!({"properties": {
                "Orders": {"value": "Server=tcp:orders", "type": "SQLAzure"},
                "Cache": {"value": "cache:6380", "type": "RedisCache"}
            }})
            .to_string(),
        )
        .reply(200, "{}");
    let svc = service(&http);

    let entries = svc.get_connection_strings("portal-api").await.unwrap();
    assert_eq!(entries[0].name, "Cache");
    assert_eq!(entries[1].connection_type, "SQLAzure");

    let updated = vec![ConnectionStringEntry {
        value: "Server=tcp:orders-v2".to_string(),
        ..entries[1].clone()
    }];
    svc.save_connection_strings("portal-api", &updated)
        .await
        .unwrap();

    let sent = &http.requests()[1];
    assert_eq!(
        sent.url,
        format!("{SITE}/config/connectionstrings?api-version=2022-03-01")
    );
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(
        body,
        json!({"properties": {"Orders": {"value": "Server=tcp:orders-v2", "type": "SQLAzure"}}})
    );
}

#[tokio::test]
async fn test_save_failure_carries_status() {
    let http = MockHttpSend::default().reply(409, "conflict");

    let err = service(&http)
        .save_environment_variables("portal-api", &[var("A", "1")])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(http::StatusCode::CONFLICT));
}
