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

use crate::{AuthCredential, AuthorizeRequest, Context, Error, ProvideCredential, Result};
use std::sync::{Arc, Mutex};

/// Authorizer loads credentials on demand and applies them to requests.
///
/// The loaded credential is cached and shared across clones; it is reloaded
/// from the provider only after [`AuthCredential::is_valid`] turns false.
#[derive(Clone, Debug)]
pub struct Authorizer<C: AuthCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = C>>,
    authorizer: Arc<dyn AuthorizeRequest<Credential = C>>,
    credential: Arc<Mutex<Option<C>>>,
}

impl<C: AuthCredential> Authorizer<C> {
    /// Create a new authorizer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        authorizer: impl AuthorizeRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            authorizer: Arc::new(authorizer),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Context this authorizer loads credentials with.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Return the cached credential, loading a fresh one if needed.
    pub async fn credential(&self) -> Result<Option<C>> {
        let cached = self.lock()?.clone();
        if cached.is_valid() {
            return Ok(cached);
        }

        let loaded = self.provider.provide_credential(&self.ctx).await?;
        *self.lock()? = loaded.clone();
        Ok(loaded)
    }

    /// Authorize the request.
    pub async fn authorize(&self, req: &mut http::request::Parts) -> Result<()> {
        let credential = self.credential().await?;

        self.authorizer
            .authorize_request(&self.ctx, req, credential.as_ref())
            .await
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<C>>> {
        self.credential
            .lock()
            .map_err(|_| Error::unexpected("credential cache lock poisoned"))
    }
}
