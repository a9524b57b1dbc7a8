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

use crate::Credential;
use appsvc_core::{AuthorizeRequest, Context, Error, Result};
use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;

/// BearerTokenAuthorizer writes `Authorization: Bearer <token>` on every request.
#[derive(Debug, Default, Clone)]
pub struct BearerTokenAuthorizer;

impl BearerTokenAuthorizer {
    /// Create a new bearer authorizer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthorizeRequest for BearerTokenAuthorizer {
    type Credential = Credential;

    async fn authorize_request(
        &self,
        _: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            log::error!(
                "no bearer token available for {} {}",
                req.method,
                req.uri
            );
            return Err(Error::credential_invalid(
                "no credential in the chain produced a bearer token",
            ));
        };

        let mut value: HeaderValue = format!("Bearer {}", cred.token).parse()?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}
