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

use crate::mock::{static_env, MockCommandExecute, MockHttpSend};
use appsvc_azure_identity::{
    BearerTokenAuthorizer, DefaultCredentialProvider, StaticCredentialProvider,
};
use appsvc_core::{Authorizer, Context, ErrorKind, ProvideCredential};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_chain_skips_failing_managed_identity() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Managed identity answers with an error and must not stop the chain.
    let http = MockHttpSend::default().reply(500, "imds unavailable");
    let cmd = MockCommandExecute::default().with(
        "az",
        0,
        r#"{"accessToken":"cli-token","expires_on":4102444800,"tokenType":"Bearer"}"#,
        "",
    );
    let ctx = Context::new()
        .with_http_send(http.clone())
        .with_command_execute(cmd.clone())
        .with_env(static_env(&[("AZURE_IMDS_ENDPOINT", "http://imds.test/token")]));

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cred.token, "cli-token");
    assert_eq!(http.requests().len(), 1);
    assert_eq!(cmd.calls().len(), 1);
}

#[tokio::test]
async fn test_chain_prefers_environment() {
    let http = MockHttpSend::default().reply(
        200,
        r#"{"token_type":"Bearer","expires_in":3599,"access_token":"sp-token"}"#,
    );
    let cmd = MockCommandExecute::default();
    let ctx = Context::new()
        .with_http_send(http)
        .with_command_execute(cmd.clone())
        .with_env(static_env(&[
            ("AZURE_TENANT_ID", "contoso"),
            ("AZURE_CLIENT_ID", "portal-app"),
            ("AZURE_CLIENT_SECRET", "s3cr3t"),
        ]));

    let cred = DefaultCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(cred.token, "sp-token");
    assert!(cmd.calls().is_empty());
}

#[tokio::test]
async fn test_authorizer_propagates_missing_token() {
    let _ = env_logger::builder().is_test(true).try_init();

    let http = MockHttpSend::default().reply(500, "imds unavailable");
    let ctx = Context::new()
        .with_http_send(http)
        .with_command_execute(MockCommandExecute::default())
        .with_env(static_env(&[("AZURE_IMDS_ENDPOINT", "http://imds.test/token")]));

    let authorizer = Authorizer::new(
        ctx,
        DefaultCredentialProvider::new(),
        BearerTokenAuthorizer::new(),
    );
    let mut parts = http::Request::get("https://management.azure.com/subscriptions")
        .body(())
        .unwrap()
        .into_parts()
        .0;

    let err = authorizer.authorize(&mut parts).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
}

#[tokio::test]
async fn test_authorizer_with_static_token() {
    let authorizer = Authorizer::new(
        Context::new(),
        StaticCredentialProvider::new("pre-issued"),
        BearerTokenAuthorizer::new(),
    );
    let mut parts = http::Request::get("https://management.azure.com/subscriptions")
        .body(())
        .unwrap()
        .into_parts()
        .0;

    authorizer.authorize(&mut parts).await.unwrap();
    assert_eq!(parts.headers["authorization"], "Bearer pre-issued");
}
