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
    AppServiceApi, CreateWebAppRequest, MetricsQuery, OperationError, SiteState,
};
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

fn site_json(name: &str, state: &str) -> serde_json::Value {
    json!({
        "id": format!("/subscriptions/{SUB}/resourceGroups/{RG}/providers/Microsoft.Web/sites/{name}"),
        "name": name,
        "location": "West Europe",
        "kind": "app,linux",
        "properties": {
            "state": state,
            "defaultHostName": format!("{name}.azurewebsites.net"),
            "serverFarmId": format!("/subscriptions/{SUB}/resourceGroups/{RG}/providers/Microsoft.Web/serverfarms/asp-portal"),
            "siteConfig": {"linuxFxVersion": "PYTHON|3.12"}
        }
    })
}

#[tokio::test]
async fn test_list_follows_next_link() {
    init_logger();
    let next = format!(
        "https://management.azure.com/subscriptions/{SUB}/resourceGroups/{RG}/providers/Microsoft.Web/sites?api-version=2022-03-01&$skiptoken=abc"
    );
    let http = MockHttpSend::default()
        .reply(
            200,
            &json!({"value": [site_json("portal-api", "Running")], "nextLink": next}).to_string(),
        )
        .reply(
            200,
            &json!({"value": [site_json("portal-web", "stopped")]}).to_string(),
        );

    let apps = service(&http).list_web_apps().await.unwrap();

    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["portal-api", "portal-web"]);
    assert_eq!(apps[0].runtime, "PYTHON|3.12");
    assert_eq!(apps[0].resource_group, RG);
    assert_eq!(apps[1].status, SiteState::Stopped);
    assert_eq!(
        http.request_lines(),
        vec![
            format!("GET https://management.azure.com/subscriptions/{SUB}/resourceGroups/{RG}/providers/Microsoft.Web/sites?api-version=2022-03-01"),
            format!("GET {next}"),
        ]
    );
}

#[tokio::test]
async fn test_list_stops_at_foreign_next_link() {
    init_logger();
    let http = MockHttpSend::default().reply(
        200,
        &json!({
            "value": [site_json("portal-api", "Running")],
            "nextLink": "https://attacker.example/sites?$skiptoken=abc"
        })
        .to_string(),
    );

    let err = service(&http).list_web_apps().await.unwrap_err();

    assert!(matches!(err, OperationError::Parse(_)));
    assert_eq!(http.requests().len(), 1);
}

#[tokio::test]
async fn test_list_without_resource_group_sends_nothing() {
    init_logger();
    let http = MockHttpSend::default();
    let svc = service_with(http.clone(), config().with_resource_group(""));

    let err = svc.list_web_apps().await.unwrap_err();

    assert!(matches!(
        err,
        OperationError::ConfigurationMissing("resource_group")
    ));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_missing_subscription_is_reported_first() {
    let http = MockHttpSend::default();
    let svc = service_with(
        http.clone(),
        appsvc_app_service::Config::default().with_resource_group(RG),
    );

    let err = svc.get_web_app("portal-api").await.unwrap_err();

    assert!(matches!(
        err,
        OperationError::ConfigurationMissing("subscription_id")
    ));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_get_missing_web_app_is_none() {
    let http = MockHttpSend::default().reply(404, r#"{"error":{"code":"ResourceNotFound"}}"#);

    assert_eq!(service(&http).get_web_app("portal-api").await.unwrap(), None);
}

#[tokio::test]
async fn test_get_web_app_failure_keeps_diagnostics() {
    let http = MockHttpSend::default().reply(500, "boom");

    let err = service(&http).get_web_app("portal-api").await.unwrap_err();

    match err {
        OperationError::Http {
            method,
            url,
            status,
            body,
        } => {
            assert_eq!(method, http::Method::GET);
            assert_eq!(url, format!("{SITE}?api-version=2022-03-01"));
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_parse_failure() {
    let http = MockHttpSend::default().reply(200, "<html>gateway</html>");

    let err = service(&http).get_web_app("portal-api").await.unwrap_err();

    assert!(matches!(err, OperationError::Parse(_)));
}

#[tokio::test]
async fn test_transport_failure_is_not_swallowed() {
    // Nothing queued: the mock transport fails.
    let http = MockHttpSend::default();

    let err = service(&http).start_web_app("portal-api").await.unwrap_err();

    assert!(matches!(err, OperationError::Transport(_)));
}

#[tokio::test]
async fn test_create_web_app() {
    let http = MockHttpSend::default().reply(200, &site_json("portal-api", "Running").to_string());
    let req = CreateWebAppRequest {
        name: "portal-api".to_string(),
        location: "West Europe".to_string(),
        app_service_plan_id: "/subscriptions/0000-1111/resourceGroups/rg-portal/providers/Microsoft.Web/serverfarms/asp-portal".to_string(),
        kind: Some("app,linux".to_string()),
        https_only: true,
        linux_fx_version: Some("PYTHON|3.12".to_string()),
        http20_enabled: true,
        always_on: false,
        app_settings: BTreeMap::from([("MODE".to_string(), "prod".to_string())]),
    };

    let app = service(&http).create_web_app(&req).await.unwrap();
    assert_eq!(app.url, "https://portal-api.azurewebsites.net");

    let sent = &http.requests()[0];
    assert_eq!(sent.method, "PUT");
    assert_eq!(sent.content_type.as_deref(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(
        body,
        json!({
            "location": "West Europe",
            "kind": "app,linux",
            "properties": {
                "serverFarmId": req.app_service_plan_id,
                "httpsOnly": true,
                "siteConfig": {
                    "http20Enabled": true,
                    "alwaysOn": false,
                    "linuxFxVersion": "PYTHON|3.12",
                    "appSettings": [{"name": "MODE", "value": "prod"}]
                }
            }
        })
    );
}

#[tokio::test]
async fn test_update_web_app_sends_patch() {
    let mut current = site_json("portal-api", "Running");
    current["properties"]["siteConfig"]["http20Enabled"] = json!(true);
    let http = MockHttpSend::default().reply(200, &current.to_string());

    let mut app = appsvc_app_service::mapper::to_web_app(
        &serde_json::from_value(site_json("portal-api", "Running")).unwrap(),
    );
    app.http_version = "2.0".to_string();
    app.always_on = true;

    let updated = service(&http).update_web_app(&app).await.unwrap();
    assert_eq!(updated.http_version, "2.0");

    let sent = &http.requests()[0];
    assert_eq!(sent.method, "PATCH");
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(body["properties"]["siteConfig"]["http20Enabled"], json!(true));
    assert_eq!(body["properties"]["siteConfig"]["alwaysOn"], json!(true));
    assert_eq!(
        body["properties"]["siteConfig"]["linuxFxVersion"],
        json!("PYTHON|3.12")
    );
}

#[tokio::test]
async fn test_lifecycle_actions() {
    let http = MockHttpSend::default()
        .reply(200, "")
        .reply(200, "")
        .reply(204, "");
    let svc = service(&http);

    svc.start_web_app("portal-api").await.unwrap();
    svc.stop_web_app("portal-api").await.unwrap();
    svc.restart_web_app("portal-api").await.unwrap();

    assert_eq!(
        http.request_lines(),
        vec![
            format!("POST {SITE}/start?api-version=2022-03-01"),
            format!("POST {SITE}/stop?api-version=2022-03-01"),
            format!("POST {SITE}/restart?api-version=2022-03-01"),
        ]
    );
}

#[tokio::test]
async fn test_delete_not_found_is_reported() {
    let http = MockHttpSend::default().reply(404, "");

    let err = service(&http).delete_web_app("portal-api").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        http.request_lines(),
        vec![format!("DELETE {SITE}?api-version=2022-03-01")]
    );
}

#[tokio::test]
async fn test_custom_api_version() {
    let http = MockHttpSend::default().reply(200, "");
    let svc = service_with(http.clone(), config().with_api_version("2023-12-01"));

    svc.start_web_app("portal-api").await.unwrap();

    assert_eq!(
        http.request_lines(),
        vec![format!("POST {SITE}/start?api-version=2023-12-01")]
    );
}

#[tokio::test]
async fn test_get_app_service_plan() {
    let plan = json!({
        "id": "/subscriptions/0000-1111/resourceGroups/rg-portal/providers/Microsoft.Web/serverfarms/asp-portal",
        "name": "asp-portal",
        "location": "West Europe",
        "kind": "linux",
        "sku": {"name": "B1", "tier": "Basic", "size": "B1", "family": "B", "capacity": 2},
        "properties": {"status": "Ready", "numberOfSites": 4}
    });
    let http = MockHttpSend::default()
        .reply(200, &site_json("portal-api", "Running").to_string())
        .reply(200, &plan.to_string());

    let plan = service(&http)
        .get_app_service_plan("portal-api")
        .await
        .unwrap();

    assert_eq!(plan.name, "asp-portal");
    assert_eq!(plan.number_of_sites, 4);
    assert_eq!(plan.pricing_tier.tier, "Basic");
    assert_eq!(plan.pricing_tier.capacity, 2);
    assert_eq!(
        http.request_lines()[1],
        format!("GET https://management.azure.com/subscriptions/{SUB}/resourceGroups/{RG}/providers/Microsoft.Web/serverfarms/asp-portal?api-version=2022-03-01")
    );
}

#[tokio::test]
async fn test_get_metrics() {
    let http = MockHttpSend::default().reply(
        200,
        &json!({"value": [{
            "name": {"value": "Http5xx"},
            "unit": "Count",
            "timeseries": [{"data": [{"timeStamp": "2024-05-01T10:00:00Z", "total": 2.0}]}]
        }]})
        .to_string(),
    );
    let query = MetricsQuery {
        metric_names: vec!["Http5xx".to_string()],
        aggregation: "Total".to_string(),
        ..Default::default()
    };

    let series = service(&http)
        .get_metrics("portal-api", &query)
        .await
        .unwrap();

    assert_eq!(series[0].name, "Http5xx");
    assert_eq!(series[0].points[0].total, Some(2.0));
    assert_eq!(
        http.request_lines(),
        vec![format!(
            "GET {SITE}/providers/microsoft.insights/metrics?metricnames=Http5xx&aggregation=Total&api-version=2018-01-01"
        )]
    );
}
