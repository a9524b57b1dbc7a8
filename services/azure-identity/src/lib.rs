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

//! Azure credentials for the resource manager.
//!
//! Two strategies are offered:
//!
//! - bearer tokens from a non-interactive credential chain, applied with
//!   [`BearerTokenAuthorizer`] and cached by [`appsvc_core::Authorizer`];
//! - a client certificate looked up by thumbprint with [`CertificateLoader`],
//!   presented by the TLS transport.
//!
//! ```no_run
//! use appsvc_azure_identity::{BearerTokenAuthorizer, DefaultCredentialProvider};
//! use appsvc_core::{Authorizer, Context, OsEnv};
//!
//! # async fn example() -> appsvc_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let authorizer = Authorizer::new(
//!     ctx,
//!     DefaultCredentialProvider::new(),
//!     BearerTokenAuthorizer::new(),
//! );
//!
//! let mut parts = http::Request::get("https://management.azure.com/subscriptions?api-version=2022-03-01")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! authorizer.authorize(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod constants;
pub use constants::ARM_DEFAULT_SCOPE;

mod credential;
pub use credential::Credential;

mod token;

mod provide_credential;
pub use provide_credential::*;

mod authorize_request;
pub use authorize_request::BearerTokenAuthorizer;

mod certificate;
pub use certificate::{
    normalize_thumbprint, CertificateInfo, CertificateLoader, ClientCertificate, StoreLocation,
};
