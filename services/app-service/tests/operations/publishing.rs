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

#[tokio::test]
async fn test_publishing_credentials_from_profile() {
    let http = MockHttpSend::default().reply(
        200,
        r#"<publishData>
  <publishProfile publishMethod="MSDeploy" publishUrl="portal-api.scm.azurewebsites.net:443"
      userName="$portal-api" userPWD="deploy-secret" />
</publishData>"#,
    );

    let creds = service(&http)
        .get_publishing_credentials("portal-api")
        .await
        .unwrap();

    assert_eq!(creds.user_name, "$portal-api");
    assert_eq!(creds.password, "deploy-secret");
    assert_eq!(
        creds.scm_url.as_deref(),
        Some("https://portal-api.scm.azurewebsites.net")
    );
    assert_eq!(
        http.request_lines(),
        vec![format!("POST {SITE}/publishxml?api-version=2022-03-01")]
    );
}

#[tokio::test]
async fn test_publishing_credentials_fall_back_to_host_names() {
    let site = json!({
        "name": "portal-api",
        "properties": {
            "enabledHostNames": [
                "portal-api.azurewebsites.net",
                "portal-api.scm.azurewebsites.net"
            ]
        }
    });
    let http = MockHttpSend::default()
        .reply(
            200,
            r#"<publishData><publishProfile publishMethod="FTP" userName="u" userPWD="p"/></publishData>"#,
        )
        .reply(200, &site.to_string());

    let creds = service(&http)
        .get_publishing_credentials("portal-api")
        .await
        .unwrap();

    assert_eq!(
        creds.scm_url.as_deref(),
        Some("https://portal-api.scm.azurewebsites.net")
    );
    assert_eq!(
        http.request_lines()[1],
        format!("GET {SITE}?api-version=2022-03-01")
    );
}

#[tokio::test]
async fn test_unusable_profile_is_a_parse_failure() {
    let http = MockHttpSend::default().reply(
        200,
        r#"<publishData><publishProfile publishMethod="FTP" userName="u"/></publishData>"#,
    );

    let err = service(&http)
        .get_publishing_credentials("portal-api")
        .await
        .unwrap_err();

    assert!(matches!(err, OperationError::Parse(_)));
    assert_eq!(http.requests().len(), 1);
}
