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
use appsvc_core::{Context, Error, ProvideCredential, Result};
use async_trait::async_trait;

/// Exchange a federated token file for an access token.
///
/// This is how pods using Azure Workload Identity on AKS authenticate; the
/// webhook injects `AZURE_FEDERATED_TOKEN_FILE` next to the tenant and client id.
///
/// Reference: <https://learn.microsoft.com/en-us/azure/aks/workload-identity-overview>
#[derive(Debug, Clone)]
pub struct WorkloadIdentityCredentialProvider {
    scope: String,
}

impl Default for WorkloadIdentityCredentialProvider {
    fn default() -> Self {
        Self {
            scope: ARM_DEFAULT_SCOPE.to_string(),
        }
    }
}

impl WorkloadIdentityCredentialProvider {
    /// Create a new workload identity provider.
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
impl ProvideCredential for WorkloadIdentityCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let (Some(tenant_id), Some(client_id), Some(token_file)) = (
            ctx.env_var(AZURE_TENANT_ID),
            ctx.env_var(AZURE_CLIENT_ID),
            ctx.env_var(AZURE_FEDERATED_TOKEN_FILE),
        ) else {
            return Ok(None);
        };

        let assertion = ctx.file_read_as_string(&token_file).await.map_err(|e| {
            Error::credential_invalid(format!("failed to read federated token file {token_file}"))
                .with_source(e)
        })?;
        let assertion = assertion.trim();
        if assertion.is_empty() {
            return Err(Error::credential_invalid(format!(
                "federated token file {token_file} is empty"
            )));
        }

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
                ("client_assertion_type", CLIENT_ASSERTION_TYPE),
                ("client_assertion", assertion),
                ("grant_type", "client_credentials"),
            ],
        )
        .await?;

        Ok(Some(cred))
    }
}
