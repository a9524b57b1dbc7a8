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

use crate::constants::ARM_DEFAULT_SCOPE;
use crate::Credential;
use appsvc_core::time::{from_unix_seconds, DateTime};
use appsvc_core::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// AzureCliCredentialProvider asks a signed-in `az` for a token.
///
/// Runs `az account get-access-token --scope <scope> --output json`. A missing
/// `az` binary means this source is not configured; a failing `az` (for example
/// "Please run az login") is reported as an error.
#[derive(Debug, Clone)]
pub struct AzureCliCredentialProvider {
    scope: String,
}

impl Default for AzureCliCredentialProvider {
    fn default() -> Self {
        Self {
            scope: ARM_DEFAULT_SCOPE.to_string(),
        }
    }
}

impl AzureCliCredentialProvider {
    /// Create a new Azure CLI provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scope to request.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureCliToken {
    access_token: String,
    expires_on: Option<String>,
    #[serde(rename = "expires_on")]
    expires_on_timestamp: Option<i64>,
}

impl AzureCliToken {
    fn expires_on(&self) -> Option<DateTime> {
        if let Some(ts) = self.expires_on_timestamp {
            return from_unix_seconds(ts).ok();
        }

        // Older CLIs only print local time, e.g. "2023-10-31 21:59:10.000000".
        let local = self.expires_on.as_deref()?;
        chrono::NaiveDateTime::parse_from_str(local, "%Y-%m-%d %H:%M:%S%.f")
            .ok()?
            .and_local_timezone(chrono::Local)
            .single()
            .map(|t| t.with_timezone(&chrono::Utc))
    }
}

#[async_trait]
impl ProvideCredential for AzureCliCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let output = match ctx
            .command_execute(
                "az",
                &[
                    "account",
                    "get-access-token",
                    "--scope",
                    &self.scope,
                    "--output",
                    "json",
                ],
            )
            .await
        {
            Ok(output) => output,
            Err(err) => {
                log::debug!("azure cli is not available: {err}");
                return Ok(None);
            }
        };

        if !output.success() {
            return Err(Error::credential_invalid(format!(
                "az account get-access-token failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let token: AzureCliToken = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::unexpected("failed to parse azure cli output").with_source(e))?;

        let expires_on = token.expires_on();
        Ok(Some(Credential::new(token.access_token, expires_on)))
    }
}
