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

use crate::config::Config;
use crate::error::{OperationError, OperationResult};
use appsvc_azure_identity::{CertificateInfo, Credential};
use appsvc_core::{Authorizer, Context, Result};
use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, StatusCode};
use log::{debug, error};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

/// Characters left alone in a resource name path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// How requests are authenticated, chosen once when the client is built.
#[derive(Debug, Clone)]
pub enum CredentialStrategy {
    /// Bearer tokens from a cached credential chain.
    Bearer(Authorizer<Credential>),
    /// Mutual TLS. The identity lives on the transport, so no header is
    /// written. `None` means the certificate could not be loaded.
    ClientCertificate(Option<CertificateInfo>),
    /// No authentication at all.
    Anonymous,
}

impl CredentialStrategy {
    async fn authorize(&self, parts: &mut http::request::Parts) -> Result<()> {
        match self {
            CredentialStrategy::Bearer(authorizer) => authorizer.authorize(parts).await,
            CredentialStrategy::ClientCertificate(_) | CredentialStrategy::Anonymous => Ok(()),
        }
    }
}

/// One control plane exchange. Non-success statuses are data, not errors.
#[derive(Debug, Clone)]
pub struct ArmResponse {
    /// Request method.
    pub method: Method,
    /// Full request url.
    pub url: String,
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
}

impl ArmResponse {
    /// Returns true for any 2xx status.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true for 404.
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }

    /// Decode the body as JSON, logging shape mismatches.
    pub fn json<T: DeserializeOwned>(&self) -> OperationResult<T> {
        serde_json::from_str(&self.body).map_err(|err| {
            error!("{} {} returned an unexpected body: {err}", self.method, self.url);
            OperationError::Parse(format!("{} {}: {err}", self.method, self.url))
        })
    }

    /// Turn this response into an HTTP failure, logging status and body.
    pub fn into_error(self) -> OperationError {
        error!(
            "{} {} failed with status {}: {}",
            self.method, self.url, self.status, self.body
        );
        OperationError::Http {
            method: self.method,
            url: self.url,
            status: self.status,
            body: self.body,
        }
    }

    /// Pass 2xx responses through, fail on anything else.
    pub fn success(self) -> OperationResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.into_error())
        }
    }
}

/// Build the request url for `path`, appending the api version.
///
/// `path` may be absolute (a `nextLink`), in which case it is used as is.
pub fn arm_url(base_url: &str, path: &str, api_version: &str) -> String {
    let mut url = if is_absolute(path) {
        path.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    };

    if url.contains("api-version=") {
        return url;
    }

    url.push(if path.contains('?') { '&' } else { '?' });
    url.push_str("api-version=");
    url.push_str(api_version);
    url
}

fn is_absolute(path: &str) -> bool {
    path.starts_with("https://") || path.starts_with("http://")
}

/// Returns true if `url` has the scheme, host and port of `base_url`.
pub fn same_origin(base_url: &str, url: &str) -> bool {
    fn origin(url: &str) -> Option<(String, String, u16)> {
        let uri: http::Uri = url.parse().ok()?;
        let scheme = uri.scheme_str()?.to_ascii_lowercase();
        let port = uri
            .port_u16()
            .unwrap_or(if scheme == "http" { 80 } else { 443 });
        Some((scheme, uri.host()?.to_ascii_lowercase(), port))
    }

    match (origin(base_url), origin(url)) {
        (Some(base), Some(other)) => base == other,
        _ => false,
    }
}

/// Encode a resource name for use as one path segment.
pub fn encode_segment(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

/// Client for the resource manager REST API.
///
/// ```no_run
/// use appsvc_app_service::{ArmClient, Config, CredentialStrategy};
/// use appsvc_core::Context;
///
/// # async fn example() -> appsvc_core::Result<()> {
/// let client = ArmClient::new(
///     Context::new(),
///     Config::default().with_subscription_id("sub").with_resource_group("rg"),
///     CredentialStrategy::Anonymous,
/// );
/// let resp = client.send(http::Method::GET, "/subscriptions/sub", None).await?;
/// println!("{}", resp.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArmClient {
    ctx: Context,
    config: Config,
    strategy: CredentialStrategy,
}

impl ArmClient {
    /// Create a client.
    pub fn new(ctx: Context, config: Config, strategy: CredentialStrategy) -> Self {
        Self {
            ctx,
            config,
            strategy,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Credential strategy in use.
    pub fn strategy(&self) -> &CredentialStrategy {
        &self.strategy
    }

    /// Returns true if `path` is an absolute url outside the configured base url.
    pub fn is_foreign(&self, path: &str) -> bool {
        is_absolute(path) && !same_origin(&self.config.base_url, path)
    }

    /// `/subscriptions/{sub}`
    pub fn subscription_path(&self) -> Option<String> {
        let sub = self.config.subscription_id.as_deref()?.trim();
        if sub.is_empty() {
            return None;
        }
        Some(format!("/subscriptions/{}", encode_segment(sub)))
    }

    /// `/subscriptions/{sub}/resourceGroups/{rg}`
    pub fn resource_group_path(&self) -> Option<String> {
        let rg = self.config.resource_group.as_deref()?.trim();
        if rg.is_empty() {
            return None;
        }
        Some(format!(
            "{}/resourceGroups/{}",
            self.subscription_path()?,
            encode_segment(rg)
        ))
    }

    /// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Web/sites/{name}`
    pub fn site_path(&self, name: &str) -> Option<String> {
        Some(format!(
            "{}/providers/Microsoft.Web/sites/{}",
            self.resource_group_path()?,
            encode_segment(name)
        ))
    }

    /// Send a request with the configured api version.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ArmResponse> {
        self.send_with_api_version(method, path, body, &self.config.api_version)
            .await
    }

    /// Send a request with an explicit api version.
    pub async fn send_with_api_version(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        api_version: &str,
    ) -> Result<ArmResponse> {
        if self.is_foreign(path) {
            return Err(appsvc_core::Error::request_invalid(format!(
                "{path} is outside {}",
                self.config.base_url
            )));
        }
        let url = arm_url(&self.config.base_url, path, api_version);

        let mut req = http::Request::builder().method(method.clone()).uri(&url);
        let content = match body {
            Some(value) => {
                req = req.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Bytes::from(serde_json::to_vec(value).map_err(|e| {
                    appsvc_core::Error::request_invalid("failed to encode request body")
                        .with_source(e)
                })?)
            }
            None => Bytes::new(),
        };
        let req = req.body(content).map_err(|e| {
            appsvc_core::Error::request_invalid(format!("invalid request for {url}")).with_source(e)
        })?;

        let (mut parts, content) = req.into_parts();
        self.strategy.authorize(&mut parts).await?;
        let req = http::Request::from_parts(parts, content);

        debug!("sending {method} {url}");
        let resp = self.ctx.http_send_as_string(req).await?;
        let status = resp.status();
        debug!("{method} {url} answered {status}");

        Ok(ArmResponse {
            method,
            url,
            status,
            body: resp.into_body(),
        })
    }
}
