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
use appsvc_azure_identity::WorkloadIdentityCredentialProvider;
use appsvc_core::{Context, ProvideCredential};
use appsvc_file_read_tokio::TokioFileRead;
use std::io::Write;

#[tokio::test]
async fn test_workload_identity_sends_federated_assertion() {
    let mut token_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(token_file, "federated.jwt.value").unwrap();
    let path = token_file.path().to_string_lossy().to_string();

    let http = MockHttpSend::default().reply(
        200,
        r#"{"token_type":"Bearer","expires_in":"3600","access_token":"wi-token"}"#,
    );
    let ctx = Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(http.clone())
        .with_env(static_env(&[
            ("AZURE_TENANT_ID", "contoso"),
            ("AZURE_CLIENT_ID", "portal-app"),
            ("AZURE_FEDERATED_TOKEN_FILE", &path),
        ]));

    let cred = WorkloadIdentityCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cred.token, "wi-token");
    assert!(cred.expires_on.is_some());

    let (_, _, body) = &http.requests()[0];
    assert!(body.contains("client_assertion=federated.jwt.value&"));
    assert!(body.contains(
        "client_assertion_type=urn%3Aietf%3Aparams%3Aoauth%3Aclient-assertion-type%3Ajwt-bearer"
    ));
}

#[tokio::test]
async fn test_workload_identity_not_configured() {
    let ctx = Context::new().with_env(static_env(&[("AZURE_TENANT_ID", "contoso")]));

    let cred = WorkloadIdentityCredentialProvider::new()
        .provide_credential(&ctx)
        .await
        .unwrap();
    assert!(cred.is_none());
}
