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

//! Client certificates looked up by thumbprint in an on-disk certificate store.
//!
//! Stores follow the .NET layout on unix: one directory per (location, name)
//! holding one `<THUMBPRINT>.pem` per certificate, with the certificate chain
//! and its private key in the same file.

use crate::constants::*;
use appsvc_core::hash::thumbprint;
use appsvc_core::time::{from_unix_seconds, now, DateTime};
use appsvc_core::{Context, Error, Result};
use rustls_pemfile::Item;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use x509_parser::prelude::*;

/// Certificate store location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreLocation {
    /// Store owned by the current user.
    #[default]
    CurrentUser,
    /// Machine wide store.
    LocalMachine,
}

impl FromStr for StoreLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "currentuser" => Ok(StoreLocation::CurrentUser),
            "localmachine" => Ok(StoreLocation::LocalMachine),
            _ => Err(Error::config_invalid(format!(
                "unknown certificate store location: {s}"
            ))),
        }
    }
}

impl Display for StoreLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreLocation::CurrentUser => f.write_str("CurrentUser"),
            StoreLocation::LocalMachine => f.write_str("LocalMachine"),
        }
    }
}

/// Metadata of a loaded client certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    /// Subject distinguished name.
    pub subject: String,
    /// Issuer distinguished name.
    pub issuer: String,
    /// Upper-case hex SHA-1 of the DER certificate.
    pub thumbprint: String,
    /// Start of the validity window.
    pub not_before: DateTime,
    /// End of the validity window.
    pub not_after: DateTime,
    /// Whether the store entry carries a private key.
    pub has_private_key: bool,
}

impl CertificateInfo {
    /// Returns true if `at` is before the validity window.
    pub fn is_not_yet_valid(&self, at: DateTime) -> bool {
        at < self.not_before
    }

    /// Returns true if `at` is after the validity window.
    pub fn is_expired(&self, at: DateTime) -> bool {
        at > self.not_after
    }
}

/// A certificate ready to be handed to the TLS transport.
#[derive(Clone)]
pub struct ClientCertificate {
    info: CertificateInfo,
    pem: Vec<u8>,
}

impl ClientCertificate {
    /// Metadata of the certificate.
    pub fn info(&self) -> &CertificateInfo {
        &self.info
    }

    /// PEM encoded certificate and private key.
    pub fn pem(&self) -> &[u8] {
        &self.pem
    }
}

impl Debug for ClientCertificate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCertificate")
            .field("info", &self.info)
            .field("pem", &format_args!("<{} bytes>", self.pem.len()))
            .finish()
    }
}

/// Normalize a thumbprint as copied from a portal or certificate manager.
///
/// Whitespace and colons are dropped and hex digits upper-cased.
pub fn normalize_thumbprint(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect::<String>()
        .to_ascii_uppercase()
}

/// CertificateLoader finds a client certificate by thumbprint.
#[derive(Debug, Clone)]
pub struct CertificateLoader {
    thumbprint: String,
    store_name: String,
    store_location: StoreLocation,
}

impl CertificateLoader {
    /// Create a loader for `thumbprint` in the `My` store of the current user.
    pub fn new(thumbprint: &str) -> Self {
        Self {
            thumbprint: normalize_thumbprint(thumbprint),
            store_name: "My".to_string(),
            store_location: StoreLocation::CurrentUser,
        }
    }

    /// Set the store name.
    pub fn with_store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    /// Set the store location.
    pub fn with_store_location(mut self, location: StoreLocation) -> Self {
        self.store_location = location;
        self
    }

    /// Normalized thumbprint this loader looks for.
    pub fn thumbprint(&self) -> &str {
        &self.thumbprint
    }

    /// Directory holding the configured store.
    ///
    /// `APPSVC_CERT_STORE_ROOT` replaces the base directory for both locations.
    pub fn store_dir(&self, ctx: &Context) -> Option<String> {
        let name = self.store_name.to_ascii_lowercase();

        if let Some(root) = ctx.env_var(APPSVC_CERT_STORE_ROOT) {
            return Some(format!("{}/{name}", root.trim_end_matches('/')));
        }

        let base = match self.store_location {
            StoreLocation::CurrentUser => ctx.expand_home_dir(CURRENT_USER_STORE_DIR)?,
            StoreLocation::LocalMachine => LOCAL_MACHINE_STORE_DIR.to_string(),
        };
        Some(format!("{base}/{name}"))
    }

    /// Load the certificate.
    ///
    /// Every failure to find a usable certificate is logged and yields `None`
    /// so the caller can continue without a client identity.
    pub async fn load(&self, ctx: &Context) -> Option<ClientCertificate> {
        let thumbprint = &self.thumbprint;
        if thumbprint.is_empty() || !thumbprint.bytes().all(|b| b.is_ascii_hexdigit()) {
            log::error!(
                "certificate thumbprint {thumbprint:?} is not a hexadecimal digest"
            );
            return None;
        }
        let store_name = &self.store_name;
        if store_name.is_empty() || !store_name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            log::error!("certificate store name {store_name:?} is not valid");
            return None;
        }

        let Some(dir) = self.store_dir(ctx) else {
            log::error!(
                "certificate store {}/{} has no home directory to resolve against",
                self.store_location,
                self.store_name
            );
            return None;
        };
        let path = format!("{dir}/{}.pem", self.thumbprint);

        let pem = match ctx.file_read(&path).await {
            Ok(pem) => pem,
            Err(err) => {
                log::error!(
                    "no certificate with thumbprint {} found in {}/{}: {err}",
                    self.thumbprint,
                    self.store_location,
                    self.store_name
                );
                return None;
            }
        };

        let info = match inspect(&pem, &self.thumbprint) {
            Ok(Some(info)) => info,
            Ok(None) => {
                log::error!(
                    "{path} does not contain a certificate with thumbprint {}",
                    self.thumbprint
                );
                return None;
            }
            Err(err) => {
                log::error!("failed to parse certificate store entry {path}: {err}");
                return None;
            }
        };

        log_certificate(&info);
        Some(ClientCertificate { info, pem })
    }
}

fn log_certificate(info: &CertificateInfo) {
    log::info!(
        "using client certificate subject={} issuer={} thumbprint={} not_before={} not_after={} has_private_key={}",
        info.subject,
        info.issuer,
        info.thumbprint,
        info.not_before,
        info.not_after,
        info.has_private_key
    );

    let at = now();
    if info.is_not_yet_valid(at) {
        log::warn!(
            "client certificate {} is not valid before {}",
            info.thumbprint,
            info.not_before
        );
    }
    if info.is_expired(at) {
        log::warn!(
            "client certificate {} expired at {}",
            info.thumbprint,
            info.not_after
        );
    }
    if !info.has_private_key {
        log::error!(
            "client certificate {} has no private key, the TLS handshake will fail",
            info.thumbprint
        );
    }
}

/// Find the certificate matching `wanted` among the PEM items.
pub(crate) fn inspect(pem: &[u8], wanted: &str) -> Result<Option<CertificateInfo>> {
    let mut certs = Vec::new();
    let mut has_private_key = false;

    for item in rustls_pemfile::read_all(&mut &pem[..]) {
        let item = item.map_err(|e| {
            Error::credential_invalid("malformed PEM in certificate store").with_source(e)
        })?;
        match item {
            Item::X509Certificate(der) => certs.push(der),
            Item::Pkcs1Key(_) | Item::Pkcs8Key(_) | Item::Sec1Key(_) => has_private_key = true,
            _ => {}
        }
    }

    for der in certs {
        if thumbprint(&der) != wanted {
            continue;
        }

        let (_, cert) = X509Certificate::from_der(&der)
            .map_err(|e| Error::credential_invalid(format!("certificate is not valid DER: {e}")))?;
        let validity = cert.validity();

        return Ok(Some(CertificateInfo {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            thumbprint: wanted.to_string(),
            not_before: from_unix_seconds(validity.not_before.timestamp())?,
            not_after: from_unix_seconds(validity.not_after.timestamp())?,
            has_private_key,
        }));
    }

    Ok(None)
}
