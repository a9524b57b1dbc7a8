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
use crate::token::request_token;
use crate::Credential;
use appsvc_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;

/// Load a service principal from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and
/// `AZURE_CLIENT_SECRET` and exchange it for a token.
///
/// Reference: <https://learn.microsoft.com/en-us/entra/identity-platform/v2-oauth2-client-creds-grant-flow>
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    scope: String,
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self {
            scope: ARM_DEFAULT_SCOPE.to_string(),
        }
    }
}

impl EnvCredentialProvider {
    /// Create a new env credential provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scope to request.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let (Some(tenant_id), Some(client_id), Some(client_secret)) = (
            ctx.env_var(AZURE_TENANT_ID),
            ctx.env_var(AZURE_CLIENT_ID),
            ctx.env_var(AZURE_CLIENT_SECRET),
        ) else {
            return Ok(None);
        };

        let authority_host = ctx
            .env_var(AZURE_AUTHORITY_HOST)
            .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());

        let cred = request_token(
            ctx,
            &authority_host,
            &tenant_id,
            &[
                ("scope", self.scope.as_str()),
                ("client_id", client_id.as_str()),
                ("client_secret", client_secret.as_str()),
                ("grant_type", "client_credentials"),
            ],
        )
        .await?;

        Ok(Some(cred))
    }
}
