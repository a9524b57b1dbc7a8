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
use appsvc_azure_identity::{Credential, EnvCredentialProvider};
use appsvc_core::{AuthCredential, Context, ErrorKind, ProvideCredential};
use pretty_assertions::assert_eq;

const TOKEN_RESPONSE: &str =
    r#"{"token_type":"Bearer","expires_in":3599,"ext_expires_in":3599,"access_token":"sp-token"}"#;

fn env() -> appsvc_core::StaticEnv {
    static_env(&[
        ("AZURE_TENANT_ID", "contoso"),
        ("AZURE_CLIENT_ID", "portal-app"),
        ("AZURE_CLIENT_SECRET", "s3cr3t"),
    ])
}

#[tokio::test]
async fn test_env_provider_requests_client_credentials_token() {
    let http = MockHttpSend::default().reply(200, TOKEN_RESPONSE);
    let ctx = Context::new().with_http_send(http.clone()).with_env(env());

    let cred: Credential = EnvCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cred.token, "sp-token");
    assert!(cred.is_valid());

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    let (method, url, body) = &requests[0];
    assert_eq!(method, "POST");
    assert_eq!(
        url,
        "https://login.microsoftonline.com/contoso/oauth2/v2.0/token"
    );
    assert_eq!(
        body,
        "scope=https%3A%2F%2Fmanagement.azure.com%2F.default&client_id=portal-app&client_secret=s3cr3t&grant_type=client_credentials"
    );
}

#[tokio::test]
async fn test_env_provider_uses_custom_scope_and_authority() {
    let http = MockHttpSend::default().reply(200, TOKEN_RESPONSE);
    let mut env = env();
    env.envs.insert(
        "AZURE_AUTHORITY_HOST".to_string(),
        "https://login.private.test/".to_string(),
    );
    let ctx = Context::new().with_http_send(http.clone()).with_env(env);

    EnvCredentialProvider::new()
        .with_scope("https://arm.private.test/.default")
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();

    let (_, url, body) = &http.requests()[0];
    assert_eq!(url, "https://login.private.test/contoso/oauth2/v2.0/token");
    assert!(body.starts_with("scope=https%3A%2F%2Farm.private.test%2F.default&"));
}

#[tokio::test]
async fn test_env_provider_rejected_secret() {
    let http = MockHttpSend::default().reply(401, r#"{"error":"invalid_client"}"#);
    let ctx = Context::new().with_http_send(http).with_env(env());

    let err = EnvCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CredentialDenied);
    assert!(err.to_string().contains("invalid_client"));
}
