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
use appsvc_app_service::{AppServiceApi, OperationError};
use pretty_assertions::assert_eq;
use serde_json::json;

const IDENTITY: &str =
    "/subscriptions/0000-1111/resourceGroups/rg-portal/providers/Microsoft.ManagedIdentity/userAssignedIdentities/id-portal";

#[tokio::test]
async fn test_remove_identity_without_configuration_sends_nothing() {
    let http = MockHttpSend::default();

    service(&http).remove_identity("portal-api").await.unwrap();

    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_remove_identity_without_any_configuration_still_succeeds() {
    let http = MockHttpSend::default();
    let svc = service_with(http.clone(), appsvc_app_service::Config::default());

    svc.remove_identity("portal-api").await.unwrap();

    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_assign_identity_without_configuration_fails() {
    let http = MockHttpSend::default();

    let err = service(&http).assign_identity("portal-api").await.unwrap_err();

    assert!(matches!(
        err,
        OperationError::ConfigurationMissing("managed_identity_resource_id")
    ));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_assign_identity() {
    let http = MockHttpSend::default().reply(200, "{}");
    let svc = service_with(
        http.clone(),
        config().with_managed_identity_resource_id(IDENTITY),
    );

    svc.assign_identity("portal-api").await.unwrap();

    let sent = &http.requests()[0];
    assert_eq!(sent.method, "PATCH");
    assert_eq!(sent.url, format!("{SITE}?api-version=2022-03-01"));
    let body: serde_json::Value = serde_json::from_str(&sent.body).unwrap();
    assert_eq!(
        body,
        json!({"identity": {"type": "UserAssigned", "userAssignedIdentities": {IDENTITY: {}}}})
    );
}

#[tokio::test]
async fn test_remove_identity() {
    let http = MockHttpSend::default().reply(200, "{}");
    let svc = service_with(
        http.clone(),
        config().with_managed_identity_resource_id(IDENTITY),
    );

    svc.remove_identity("portal-api").await.unwrap();

    let body: serde_json::Value = serde_json::from_str(&http.requests()[0].body).unwrap();
    assert_eq!(body, json!({"identity": {"type": "None"}}));
}
