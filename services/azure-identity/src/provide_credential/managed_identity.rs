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

use crate::constants::*;
use crate::token::{parse_expiry, scope_to_resource};
use crate::Credential;
use appsvc_core::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use std::time::Duration;

/// Load a managed identity token.
///
/// Inside App Service the platform exposes `IDENTITY_ENDPOINT` and
/// `IDENTITY_HEADER`; everywhere else the instance metadata service is probed.
/// A user-assigned identity is selected with [`Self::with_client_id`] or
/// `AZURE_CLIENT_ID`.
///
/// Reference: <https://learn.microsoft.com/en-us/azure/app-service/overview-managed-identity#rest-endpoint-reference>
#[derive(Debug, Clone)]
pub struct ManagedIdentityCredentialProvider {
    scope: String,
    client_id: Option<String>,
    imds_timeout: Duration,
}

impl Default for ManagedIdentityCredentialProvider {
    fn default() -> Self {
        Self {
            scope: ARM_DEFAULT_SCOPE.to_string(),
            client_id: None,
            imds_timeout: Duration::from_secs(1),
        }
    }
}

impl ManagedIdentityCredentialProvider {
    /// Create a new managed identity provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scope to request.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Select a user-assigned identity by client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set how long to wait for the instance metadata service before giving up.
    pub fn with_imds_timeout(mut self, timeout: Duration) -> Self {
        self.imds_timeout = timeout;
        self
    }

    fn query(&self, ctx: &Context, api_version: &str) -> String {
        let resource = utf8_percent_encode(scope_to_resource(&self.scope), NON_ALPHANUMERIC);
        let mut query = format!("api-version={api_version}&resource={resource}");
        if let Some(client_id) = self
            .client_id
            .clone()
            .or_else(|| ctx.env_var(AZURE_CLIENT_ID))
        {
            query.push_str("&client_id=");
            query.extend(utf8_percent_encode(&client_id, NON_ALPHANUMERIC));
        }
        query
    }

    fn build_request(&self, ctx: &Context) -> Result<(http::Request<bytes::Bytes>, bool)> {
        let builder = http::Request::builder().method(http::Method::GET);

        let (builder, is_imds) = match (
            ctx.env_var(IDENTITY_ENDPOINT),
            ctx.env_var(IDENTITY_HEADER),
        ) {
            (Some(endpoint), Some(secret)) => {
                let uri = format!(
                    "{endpoint}?{}",
                    self.query(ctx, APP_SERVICE_IDENTITY_API_VERSION)
                );
                (builder.uri(uri).header("X-IDENTITY-HEADER", secret), false)
            }
            _ => {
                let endpoint = ctx
                    .env_var(AZURE_IMDS_ENDPOINT)
                    .unwrap_or_else(|| DEFAULT_IMDS_ENDPOINT.to_string());
                let uri = format!("{endpoint}?{}", self.query(ctx, IMDS_API_VERSION));
                (builder.uri(uri).header("Metadata", "true"), true)
            }
        };

        let req = builder
            .body(bytes::Bytes::new())
            .map_err(|e| Error::unexpected("failed to build managed identity request").with_source(e))?;
        Ok((req, is_imds))
    }
}

#[derive(Deserialize)]
struct ManagedIdentityToken {
    access_token: String,
    #[serde(default)]
    expires_on: Option<serde_json::Value>,
}

#[async_trait]
impl ProvideCredential for ManagedIdentityCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let (req, is_imds) = self.build_request(ctx)?;
        let url = req.uri().to_string();

        let resp = if is_imds {
            match tokio::time::timeout(self.imds_timeout, ctx.http_send(req)).await {
                Ok(resp) => resp?,
                Err(_) => {
                    log::debug!("instance metadata service did not answer in time, skipped");
                    return Ok(None);
                }
            }
        } else {
            ctx.http_send(req).await?
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let body = String::from_utf8_lossy(resp.body());
            return Err(Error::credential_denied(format!(
                "managed identity request to {url} failed with status {status}: {body}"
            )));
        }

        let token: ManagedIdentityToken = serde_json::from_slice(resp.body()).map_err(|e| {
            Error::unexpected("failed to parse managed identity response").with_source(e)
        })?;

        let expires_on = token.expires_on.as_ref().and_then(parse_expiry);
        Ok(Some(Credential::new(token.access_token, expires_on)))
    }
}
