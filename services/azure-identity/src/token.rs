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

//! Helpers shared by the providers that talk to an OAuth token endpoint.

use crate::Credential;
use appsvc_core::time::{from_unix_seconds, now, parse_rfc3339, DateTime};
use appsvc_core::{Context, Error, Result};
use serde::Deserialize;

/// Response of the Microsoft identity platform v2 token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

/// Turn an ARM scope such as `https://management.azure.com/.default` into the
/// resource form expected by managed identity endpoints.
pub(crate) fn scope_to_resource(scope: &str) -> &str {
    scope.strip_suffix("/.default").unwrap_or(scope)
}

/// Parse an expiry that may be unix seconds (number or string) or RFC 3339.
pub(crate) fn parse_expiry(value: &serde_json::Value) -> Option<DateTime> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().and_then(|v| from_unix_seconds(v).ok()),
        serde_json::Value::String(s) => match s.parse::<i64>() {
            Ok(v) => from_unix_seconds(v).ok(),
            Err(_) => parse_rfc3339(s).ok(),
        },
        _ => None,
    }
}

fn parse_lifetime(value: &serde_json::Value) -> Option<DateTime> {
    let secs = match value {
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.parse::<i64>().ok()?,
        _ => return None,
    };
    Some(now() + chrono::TimeDelta::try_seconds(secs)?)
}

/// POST a form to `{authority}/{tenant}/oauth2/v2.0/token` and return the bearer token.
pub(crate) async fn request_token(
    ctx: &Context,
    authority_host: &str,
    tenant_id: &str,
    form: &[(&str, &str)],
) -> Result<Credential> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        authority_host.trim_end_matches('/'),
        tenant_id
    );

    let body = {
        let mut s = form_urlencoded::Serializer::new(String::new());
        for (k, v) in form {
            s.append_pair(k, v);
        }
        s.finish()
    };

    let req = http::Request::builder()
        .method(http::Method::POST)
        .uri(&url)
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(bytes::Bytes::from(body))
        .map_err(|e| Error::unexpected("failed to build token request").with_source(e))?;

    let resp = ctx.http_send(req).await?;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = String::from_utf8_lossy(resp.body());
        return Err(Error::credential_denied(format!(
            "token request to {url} failed with status {status}: {body}"
        )));
    }

    let token: TokenResponse = serde_json::from_slice(resp.body())
        .map_err(|e| Error::unexpected("failed to parse token response").with_source(e))?;

    let expires_on = token.expires_in.as_ref().and_then(parse_lifetime);
    Ok(Credential::new(token.access_token, expires_on))
}
