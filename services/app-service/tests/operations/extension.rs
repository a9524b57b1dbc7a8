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
use appsvc_app_service::{AppServiceApi, OperationError, SiteExtension, UninstallOutcome};
use http::StatusCode;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test_case(SiteExtension::ApplicationInsights, "Microsoft.ApplicationInsights.AzureWebSites")]
#[test_case(SiteExtension::AspNetCoreLogging, "Microsoft.AspNetCore.AzureAppServices.SiteExtension")]
#[test_case(SiteExtension::Dynatrace, "Dynatrace")]
#[tokio::test]
async fn test_install_uses_extension_api_version(ext: SiteExtension, id: &str) {
    let http = MockHttpSend::default().reply(201, "{}");

    service(&http)
        .install_site_extension("portal-api", ext)
        .await
        .unwrap();

    let sent = &http.requests()[0];
    assert_eq!(
        format!("{} {}", sent.method, sent.url),
        format!("PUT {SITE}/siteextensions/{id}?api-version=2024-04-01")
    );
    assert_eq!(sent.body, "{}");
}

#[test_case(200, Some(true); "installed")]
#[test_case(404, Some(false); "absent")]
#[test_case(500, None; "failure")]
#[tokio::test]
async fn test_check_site_extension(status: u16, expected: Option<bool>) {
    let http = MockHttpSend::default().reply(status, "{}");

    let result = service(&http)
        .check_site_extension("portal-api", SiteExtension::Dynatrace)
        .await;

    match expected {
        Some(installed) => assert_eq!(result.unwrap(), installed),
        None => assert_eq!(
            result.unwrap_err().status(),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        ),
    }
    assert_eq!(
        http.request_lines(),
        vec![format!(
            "GET {SITE}/siteextensions/Dynatrace?api-version=2024-04-01"
        )]
    );
}

#[tokio::test]
async fn test_uninstall_missing_extension_succeeds() {
    let http = MockHttpSend::default().reply(404, r#"{"Code":"NotFound"}"#);

    let outcome = service(&http)
        .uninstall_site_extension("portal-api", SiteExtension::AspNetCoreLogging)
        .await
        .unwrap();

    assert_eq!(outcome, UninstallOutcome::AlreadyAbsent);
    assert_eq!(http.requests()[0].method, "DELETE");
}

#[tokio::test]
async fn test_uninstall_installed_extension() {
    let http = MockHttpSend::default().reply(200, "");

    let outcome = service(&http)
        .uninstall_site_extension("portal-api", SiteExtension::ApplicationInsights)
        .await
        .unwrap();

    assert_eq!(outcome, UninstallOutcome::Removed);
}

#[test_case(400)]
#[test_case(409)]
#[test_case(500)]
#[test_case(503)]
#[tokio::test]
async fn test_uninstall_failure_carries_status(status: u16) {
    let http = MockHttpSend::default().reply(status, "nope");

    let err = service(&http)
        .uninstall_site_extension("portal-api", SiteExtension::Dynatrace)
        .await
        .unwrap_err();

    match err {
        OperationError::Http {
            status: got, body, ..
        } => {
            assert_eq!(got.as_u16(), status);
            assert_eq!(body, "nope");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
