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
use appsvc_core::time::parse_rfc3339;
use appsvc_core::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// AzureDeveloperCliCredentialProvider asks a signed-in `azd` for a token.
///
/// Runs `azd auth token --scope <scope> --output json`.
#[derive(Debug, Clone)]
pub struct AzureDeveloperCliCredentialProvider {
    scope: String,
}

impl Default for AzureDeveloperCliCredentialProvider {
    fn default() -> Self {
        Self {
            scope: ARM_DEFAULT_SCOPE.to_string(),
        }
    }
}

impl AzureDeveloperCliCredentialProvider {
    /// Create a new Azure Developer CLI provider.
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
struct AzdToken {
    token: String,
    expires_on: Option<String>,
}

#[async_trait]
impl ProvideCredential for AzureDeveloperCliCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let output = match ctx
            .command_execute(
                "azd",
                &["auth", "token", "--scope", &self.scope, "--output", "json"],
            )
            .await
        {
            Ok(output) => output,
            Err(err) => {
                log::debug!("azure developer cli is not available: {err}");
                return Ok(None);
            }
        };

        if !output.success() {
            return Err(Error::credential_invalid(format!(
                "azd auth token failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let token: AzdToken = serde_json::from_slice(&output.stdout)
            .map_err(|e| Error::unexpected("failed to parse azd output").with_source(e))?;

        let expires_on = token
            .expires_on
            .as_deref()
            .and_then(|v| parse_rfc3339(v).ok());
        Ok(Some(Credential::new(token.token, expires_on)))
    }
}
