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

//! Domain models handed to callers.

use appsvc_core::time::DateTime;
use appsvc_core::utils::Redact;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Normalized state of a web app.
///
/// `Running`, `Stopped` and `Unknown` are normalized; anything else the control
/// plane reports is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SiteState {
    /// The site is serving.
    Running,
    /// The site is stopped.
    Stopped,
    /// No state was reported.
    Unknown,
    /// Any other state, as reported.
    Other(String),
}

impl From<String> for SiteState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Running" => SiteState::Running,
            "Stopped" => SiteState::Stopped,
            "Unknown" => SiteState::Unknown,
            _ => SiteState::Other(value),
        }
    }
}

impl From<SiteState> for String {
    fn from(value: SiteState) -> Self {
        value.to_string()
    }
}

impl Display for SiteState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteState::Running => f.write_str("Running"),
            SiteState::Stopped => f.write_str("Stopped"),
            SiteState::Unknown => f.write_str("Unknown"),
            SiteState::Other(v) => f.write_str(v),
        }
    }
}

/// Managed identities attached to a web app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySummary {
    /// `SystemAssigned`, `UserAssigned`, both, or `None`.
    pub identity_type: String,
    /// Resource ids of the attached user-assigned identities.
    pub user_assigned_identities: Vec<String>,
}

/// A web app as shown to operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebApp {
    /// Stable identifier; the site name, unique within its resource group.
    pub id: String,
    /// Site name.
    pub name: String,
    /// Full resource manager id, when known.
    pub arm_id: Option<String>,
    /// Resource group holding the site.
    pub resource_group: String,
    /// Azure region.
    pub location: String,
    /// Resource kind, e.g. `app,linux`.
    pub kind: Option<String>,
    /// Normalized state.
    pub status: SiteState,
    /// `https://{default host name}`, or empty.
    pub url: String,
    /// Whether plain HTTP is redirected to HTTPS.
    pub https_only: bool,
    /// `2.0` or `1.1`.
    pub http_version: String,
    /// Whether web sockets are enabled.
    pub web_sockets_enabled: bool,
    /// Whether the site is kept loaded.
    pub always_on: bool,
    /// Number of workers.
    pub current_instances: u32,
    /// Human readable runtime, e.g. `Node 18` or `DOTNETCORE|8.0`.
    pub runtime: String,
    /// Resource id of the App Service plan.
    pub app_service_plan_id: Option<String>,
    /// Host names the site answers on, including the deployment endpoint.
    pub enabled_host_names: Vec<String>,
    /// Resource tags.
    pub tags: BTreeMap<String, String>,
    /// Attached identities.
    pub identity: Option<IdentitySummary>,
    /// Creation time.
    pub created_date: Option<DateTime>,
    /// Last modification time.
    pub last_modified_date: Option<DateTime>,
    /// App settings by name.
    pub app_settings: BTreeMap<String, String>,
    /// Connection string values by name.
    pub connection_strings: BTreeMap<String, String>,
}

/// Pricing tier of an App Service plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    /// SKU name, e.g. `P1v3`.
    pub name: String,
    /// Tier, e.g. `PremiumV3`.
    pub tier: String,
    /// Size, e.g. `P1v3`.
    pub size: String,
    /// Family, e.g. `Pv3`.
    pub family: String,
    /// Number of instances.
    pub capacity: u32,
}

/// The compute plan a web app runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppServicePlan {
    /// Full resource manager id.
    pub id: String,
    /// Plan name.
    pub name: String,
    /// Azure region.
    pub location: String,
    /// Resource kind, e.g. `linux`.
    pub kind: Option<String>,
    /// Provisioning status, e.g. `Ready`.
    pub status: String,
    /// Number of sites hosted on the plan.
    pub number_of_sites: u32,
    /// Pricing tier.
    pub pricing_tier: PricingTier,
}

/// Where a setting value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueSource {
    /// Stored on the site itself.
    #[serde(rename = "App Service")]
    AppService,
    /// Resolved from Key Vault at runtime.
    #[serde(rename = "Key Vault Reference")]
    KeyVaultReference,
}

impl Display for ValueSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::AppService => f.write_str("App Service"),
            ValueSource::KeyVaultReference => f.write_str("Key Vault Reference"),
        }
    }
}

/// An app setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
    pub source: ValueSource,
    pub is_slot_setting: bool,
    pub is_value_hidden: bool,
}

/// A connection string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStringEntry {
    pub name: String,
    pub value: String,
    /// Database type, e.g. `SQLAzure` or `Custom`.
    #[serde(rename = "type")]
    pub connection_type: String,
    pub source: ValueSource,
    pub is_slot_setting: bool,
    pub is_value_hidden: bool,
}

/// Credentials of the deployment endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingCredentials {
    pub user_name: String,
    pub password: String,
    /// `https://{scm host}`, when it could be determined.
    pub scm_url: Option<String>,
}

impl Debug for PublishingCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishingCredentials")
            .field("user_name", &self.user_name)
            .field("password", &Redact::from(&self.password))
            .field("scm_url", &self.scm_url)
            .finish()
    }
}

/// One sample of a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    pub timestamp: Option<DateTime>,
    pub average: Option<f64>,
    pub total: Option<f64>,
    pub maximum: Option<f64>,
}

/// A metric time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSeries {
    pub name: String,
    pub unit: String,
    pub points: Vec<MetricPoint>,
}

/// Which metrics to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsQuery {
    /// Metric names, e.g. `Requests`.
    pub metric_names: Vec<String>,
    /// ISO 8601 interval such as `PT1H`, or a `start/end` timespan.
    pub timespan: Option<String>,
    /// Grain such as `PT5M`.
    pub interval: Option<String>,
    /// Comma separated aggregations.
    pub aggregation: String,
}

impl Default for MetricsQuery {
    fn default() -> Self {
        Self {
            metric_names: ["Requests", "CpuTime", "MemoryWorkingSet", "Http5xx"]
                .iter()
                .map(|v| v.to_string())
                .collect(),
            timespan: None,
            interval: None,
            aggregation: "Average,Total,Maximum".to_string(),
        }
    }
}

/// Input of `create_web_app`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWebAppRequest {
    pub name: String,
    pub location: String,
    /// Resource id of the App Service plan to host the site.
    pub app_service_plan_id: String,
    /// Resource kind, `app` unless set.
    pub kind: Option<String>,
    pub https_only: bool,
    /// Linux runtime stack, e.g. `NODE|18-lts`.
    pub linux_fx_version: Option<String>,
    pub http20_enabled: bool,
    pub always_on: bool,
    pub app_settings: BTreeMap<String, String>,
}

/// The site extensions operators can manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteExtension {
    /// Application Insights agent.
    ApplicationInsights,
    /// ASP.NET Core logging integration.
    AspNetCoreLogging,
    /// Dynatrace OneAgent.
    Dynatrace,
}

impl SiteExtension {
    /// All managed extensions.
    pub const ALL: [SiteExtension; 3] = [
        SiteExtension::ApplicationInsights,
        SiteExtension::AspNetCoreLogging,
        SiteExtension::Dynatrace,
    ];

    /// Extension id in the site extension gallery.
    pub fn id(&self) -> &'static str {
        match self {
            SiteExtension::ApplicationInsights => "Microsoft.ApplicationInsights.AzureWebSites",
            SiteExtension::AspNetCoreLogging => {
                "Microsoft.AspNetCore.AzureAppServices.SiteExtension"
            }
            SiteExtension::Dynatrace => "Dynatrace",
        }
    }
}

impl FromStr for SiteExtension {
    type Err = appsvc_core::Error;

    fn from_str(s: &str) -> appsvc_core::Result<Self> {
        SiteExtension::ALL
            .into_iter()
            .find(|ext| {
                ext.id().eq_ignore_ascii_case(s) || format!("{ext:?}").eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| {
                appsvc_core::Error::request_invalid(format!("unknown site extension: {s}"))
            })
    }
}

/// Outcome of removing a site extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallOutcome {
    /// The extension was installed and has been removed.
    Removed,
    /// The extension was not installed.
    AlreadyAbsent,
}
