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

use crate::mock::{static_env, MockHttpSend};
use appsvc_azure_identity::ManagedIdentityCredentialProvider;
use appsvc_core::time::from_unix_seconds;
use appsvc_core::{Context, ProvideCredential};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_managed_identity_inside_app_service() {
    let http = MockHttpSend::default().reply(
        200,
        r#"{"access_token":"mi-token","expires_on":"1700000000","resource":"https://management.azure.com","token_type":"Bearer"}"#,
    );
    let ctx = Context::new().with_http_send(http.clone()).with_env(static_env(&[
        ("IDENTITY_ENDPOINT", "http://127.0.0.1:41741/msi/token"),
        ("IDENTITY_HEADER", "header-secret"),
    ]));

    let cred = ManagedIdentityCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cred.token, "mi-token");
    assert_eq!(cred.expires_on, from_unix_seconds(1_700_000_000).ok());

    let (method, url, _) = &http.requests()[0];
    assert_eq!(method, "GET");
    assert!(url.starts_with("http://127.0.0.1:41741/msi/token?api-version=2019-08-01"));
}

#[tokio::test]
async fn test_managed_identity_error_status() {
    let http = MockHttpSend::default().reply(400, "identity not found");
    let ctx = Context::new()
        .with_http_send(http)
        .with_env(static_env(&[("AZURE_IMDS_ENDPOINT", "http://imds.test/token")]));

    let err = ManagedIdentityCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("identity not found"));
}
