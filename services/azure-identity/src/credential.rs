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

use appsvc_core::time::{now, DateTime};
use appsvc_core::utils::Redact;
use appsvc_core::AuthCredential;
use std::fmt::{Debug, Formatter};

/// Bearer token accepted by the resource manager.
#[derive(Clone)]
pub struct Credential {
    /// Raw access token, without the `Bearer ` prefix.
    pub token: String,
    /// Expiration time for this credential, if the issuer reported one.
    pub expires_on: Option<DateTime>,
}

impl Credential {
    /// Create a new bearer credential.
    pub fn new(token: impl Into<String>, expires_on: Option<DateTime>) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &Redact::from(&self.token))
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

impl AuthCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.token.is_empty() {
            return false;
        }

        // Take 20s as buffer so a token never expires mid-flight.
        match self.expires_on {
            Some(expires_on) => expires_on > now() + chrono::TimeDelta::seconds(20),
            None => true,
        }
    }
}
