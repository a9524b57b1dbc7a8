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
use appsvc_core::{Context, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How outbound resource manager calls are authenticated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthType {
    /// Bearer token from the default credential chain.
    #[default]
    Arm,
    /// Private control plane reached with a client certificate.
    Private,
    /// Client certificate against the public control plane.
    Certificate,
    /// No authentication at all.
    None,
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arm" => Ok(AuthType::Arm),
            "private" => Ok(AuthType::Private),
            "certificate" => Ok(AuthType::Certificate),
            "none" => Ok(AuthType::None),
            _ => Err(Error::config_invalid(format!("unknown auth type: {s}"))),
        }
    }
}

impl TryFrom<String> for AuthType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AuthType> for String {
    fn from(value: AuthType) -> Self {
        value.to_string()
    }
}

impl Display for AuthType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthType::Arm => f.write_str("ARM"),
            AuthType::Private => f.write_str("Private"),
            AuthType::Certificate => f.write_str("Certificate"),
            AuthType::None => f.write_str("None"),
        }
    }
}

/// Operating mode, fixed when the service is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Talk to the control plane.
    #[default]
    Live,
    /// Serve seeded in-memory data; never touches the network.
    Offline,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "offline" => Ok(Mode::Offline),
            _ => Err(Error::config_invalid(format!("unknown mode: {s}"))),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Live => "live".to_string(),
            Mode::Offline => "offline".to_string(),
        }
    }
}

/// Client certificate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateConfig {
    /// Thumbprint of the certificate to present.
    pub thumbprint: Option<String>,
    /// Store name, `My` unless set.
    pub store_name: String,
    /// Store location, `CurrentUser` or `LocalMachine`.
    pub store_location: String,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            thumbprint: None,
            store_name: DEFAULT_STORE_NAME.to_string(),
            store_location: DEFAULT_STORE_LOCATION.to_string(),
        }
    }
}

/// Config for the App Service control plane integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base url of the control plane.
    ///
    /// - env value: `APPSVC_ARM_BASE_URL`
    pub base_url: String,
    /// API version appended to every call.
    ///
    /// - env value: `APPSVC_ARM_API_VERSION`
    pub api_version: String,
    /// Subscription holding the web apps.
    ///
    /// - env value: `AZURE_SUBSCRIPTION_ID`
    pub subscription_id: Option<String>,
    /// Resource group holding the web apps.
    ///
    /// - env value: `APPSVC_RESOURCE_GROUP`
    pub resource_group: Option<String>,
    /// - env value: `APPSVC_AUTH_TYPE`
    pub auth_type: AuthType,
    /// Token scope for bearer authentication.
    ///
    /// - env value: `APPSVC_ARM_SCOPE`
    pub scope: String,
    /// Client certificate settings, used by `Private` and `Certificate`.
    pub certificate: CertificateConfig,
    /// User-assigned identity attached by `assign_identity`.
    ///
    /// - env value: `APPSVC_MANAGED_IDENTITY_ID`
    pub managed_identity_resource_id: Option<String>,
    /// - env value: `APPSVC_MODE`
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            subscription_id: None,
            resource_group: None,
            auth_type: AuthType::default(),
            scope: DEFAULT_SCOPE.to_string(),
            certificate: CertificateConfig::default(),
            managed_identity_resource_id: None,
            mode: Mode::default(),
        }
    }
}

impl Config {
    /// Overlay values found in the environment.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(APPSVC_ARM_BASE_URL) {
            self.base_url = v;
        }
        if let Some(v) = ctx.env_var(APPSVC_ARM_API_VERSION) {
            self.api_version = v;
        }
        if let Some(v) = ctx.env_var(AZURE_SUBSCRIPTION_ID) {
            self.subscription_id = Some(v);
        }
        if let Some(v) = ctx.env_var(APPSVC_RESOURCE_GROUP) {
            self.resource_group = Some(v);
        }
        if let Some(v) = ctx.env_var(APPSVC_AUTH_TYPE) {
            self.auth_type = v.parse()?;
        }
        if let Some(v) = ctx.env_var(APPSVC_ARM_SCOPE) {
            self.scope = v;
        }
        if let Some(v) = ctx.env_var(APPSVC_CERT_THUMBPRINT) {
            self.certificate.thumbprint = Some(v);
        }
        if let Some(v) = ctx.env_var(APPSVC_CERT_STORE_NAME) {
            self.certificate.store_name = v;
        }
        if let Some(v) = ctx.env_var(APPSVC_CERT_STORE_LOCATION) {
            self.certificate.store_location = v;
        }
        if let Some(v) = ctx.env_var(APPSVC_MANAGED_IDENTITY_ID) {
            self.managed_identity_resource_id = Some(v);
        }
        if let Some(v) = ctx.env_var(APPSVC_MODE) {
            self.mode = v.parse()?;
        }

        Ok(self)
    }

    /// Parse config from a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::config_invalid("failed to parse config").with_source(e))
    }

    /// Set the base url.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the api version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the subscription id.
    pub fn with_subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    /// Set the resource group.
    pub fn with_resource_group(mut self, resource_group: impl Into<String>) -> Self {
        self.resource_group = Some(resource_group.into());
        self
    }

    /// Set the auth type.
    pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
        self.auth_type = auth_type;
        self
    }

    /// Set the token scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Set the client certificate thumbprint.
    pub fn with_certificate_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
        self.certificate.thumbprint = Some(thumbprint.into());
        self
    }

    /// Set the user-assigned identity resource id.
    pub fn with_managed_identity_resource_id(mut self, id: impl Into<String>) -> Self {
        self.managed_identity_resource_id = Some(id.into());
        self
    }

    /// Set the operating mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}
