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
use crate::provide_credential::{
    AzureCliCredentialProvider, AzureDeveloperCliCredentialProvider, EnvCredentialProvider,
    ManagedIdentityCredentialProvider, WorkloadIdentityCredentialProvider,
};
use crate::Credential;
use appsvc_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use async_trait::async_trait;

/// Default provider that tries every non-interactive source in order.
///
/// 1. Service principal from the environment
/// 2. Workload identity (federated token file)
/// 3. Managed identity (App Service endpoint or instance metadata)
/// 4. Azure CLI
/// 5. Azure Developer CLI
///
/// Interactive browser sign-in is never attempted.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::with_scope(ARM_DEFAULT_SCOPE)
    }
}

impl DefaultCredentialProvider {
    /// Create a default provider requesting the public resource manager scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default provider requesting `scope`.
    pub fn with_scope(scope: &str) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new().with_scope(scope))
            .push(WorkloadIdentityCredentialProvider::new().with_scope(scope))
            .push(ManagedIdentityCredentialProvider::new().with_scope(scope))
            .push(AzureCliCredentialProvider::new().with_scope(scope))
            .push(AzureDeveloperCliCredentialProvider::new().with_scope(scope));

        Self { chain }
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
