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

//! Core abstractions shared by every appsvc crate.
//!
//! The crate is organised around three ideas:
//!
//! - **Context**: a bundle of runtime capabilities (file reading, HTTP sending,
//!   environment access and command execution). Every capability is a trait so
//!   tests can swap in recording fakes.
//! - **Credentials**: [`ProvideCredential`] loads a credential,
//!   [`AuthorizeRequest`] applies it to an outgoing request.
//! - **Authorizer**: [`Authorizer`] ties both together and caches the loaded
//!   credential until it stops being valid.
//!
//! ## Example
//!
//! ```no_run
//! use appsvc_core::{AuthCredential, AuthorizeRequest, Authorizer, Context, ProvideCredential, Result};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl AuthCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct FixedToken;
//!
//! #[async_trait]
//! impl ProvideCredential for FixedToken {
//!     type Credential = Token;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
//!         Ok(Some(Token("secret".to_string())))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct HeaderWriter;
//!
//! #[async_trait]
//! impl AuthorizeRequest for HeaderWriter {
//!     type Credential = Token;
//!
//!     async fn authorize_request(
//!         &self,
//!         _: &Context,
//!         req: &mut http::request::Parts,
//!         credential: Option<&Token>,
//!     ) -> Result<()> {
//!         if let Some(token) = credential {
//!             req.headers.insert("authorization", format!("Bearer {}", token.0).parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let authorizer = Authorizer::new(Context::new(), FixedToken, HeaderWriter);
//! let mut parts = http::Request::get("https://management.azure.com/subscriptions")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! authorizer.authorize(&mut parts).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};

mod fs;
pub use fs::{FileRead, NoopFileRead};
mod http_send;
pub use http_send::{HttpSend, NoopHttpSend};
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod command;
pub use command::{CommandExecute, CommandOutput, NoopCommandExecute};

mod context;
pub use context::Context;

mod api;
pub use api::{AuthCredential, AuthorizeRequest, ProvideCredential, ProvideCredentialChain};
mod authorizer;
pub use authorizer::Authorizer;
