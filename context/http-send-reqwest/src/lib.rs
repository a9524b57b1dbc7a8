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

//! Reqwest-based HTTP transport for appsvc.
//!
//! `ReqwestHttpSend` implements [`HttpSend`] with a `reqwest::Client`. Use
//! [`ReqwestHttpSend::with_client_identity`] when the control plane must be
//! reached with a client certificate instead of a bearer token.
//!
//! ```no_run
//! use appsvc_core::Context;
//! use appsvc_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use appsvc_core::{Error, HttpSend, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, ClientBuilder, Identity, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client that presents `pem` during the TLS handshake.
    ///
    /// `pem` must hold the certificate chain followed by its private key.
    pub fn with_client_identity(pem: &[u8]) -> Result<Self> {
        Self::with_client_identity_from(Client::builder(), pem)
    }

    /// Same as [`ReqwestHttpSend::with_client_identity`], starting from `builder`.
    ///
    /// Use it to add trust anchors or timeouts to the client.
    pub fn with_client_identity_from(builder: ClientBuilder, pem: &[u8]) -> Result<Self> {
        let identity = Identity::from_pem(pem).map_err(|e| {
            Error::config_invalid("client certificate is not a usable TLS identity")
                .with_source(e)
        })?;

        let client = builder
            .use_rustls_tls()
            .identity(identity)
            .build()
            .map_err(|e| Error::unexpected("failed to build HTTP client").with_source(e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let url = req.url().to_string();
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected(format!("failed to send request to {url}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
