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

//! Wire shapes of the resource manager JSON this crate reads.
//!
//! Every field is optional so partially populated resources still decode.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Paged list (`value` array with optional `nextLink`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmList<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default)]
    pub next_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmSite {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub identity: Option<ArmIdentity>,
    #[serde(default)]
    pub system_data: Option<SystemData>,
    #[serde(default)]
    pub properties: Option<SiteProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteProperties {
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub resource_group: Option<String>,
    #[serde(default)]
    pub default_host_name: Option<String>,
    #[serde(default)]
    pub enabled_host_names: Option<Vec<String>>,
    #[serde(default)]
    pub https_only: Option<bool>,
    #[serde(default)]
    pub server_farm_id: Option<String>,
    #[serde(default)]
    pub last_modified_time_utc: Option<String>,
    #[serde(default)]
    pub site_config: Option<SiteConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub linux_fx_version: Option<String>,
    #[serde(default)]
    pub windows_fx_version: Option<String>,
    #[serde(default)]
    pub java_version: Option<String>,
    #[serde(default)]
    pub python_version: Option<String>,
    #[serde(default)]
    pub node_version: Option<String>,
    #[serde(default)]
    pub php_version: Option<String>,
    #[serde(default)]
    pub net_framework_version: Option<String>,
    #[serde(default)]
    pub http20_enabled: Option<bool>,
    #[serde(default)]
    pub web_sockets_enabled: Option<bool>,
    #[serde(default)]
    pub always_on: Option<bool>,
    #[serde(default)]
    pub number_of_workers: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmIdentity {
    #[serde(default, rename = "type")]
    pub identity_type: Option<String>,
    #[serde(default)]
    pub user_assigned_identities: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_modified_at: Option<String>,
}

/// Body of `config/appsettings/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmStringDictionary {
    #[serde(default)]
    pub properties: Option<BTreeMap<String, Option<String>>>,
}

/// Body of `config/connectionstrings/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmConnectionStringDictionary {
    #[serde(default)]
    pub properties: Option<BTreeMap<String, ArmConnectionString>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmConnectionString {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "type")]
    pub connection_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmPlan {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub sku: Option<ArmSku>,
    #[serde(default)]
    pub properties: Option<ArmPlanProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmSku {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmPlanProperties {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub number_of_sites: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmMetricResponse {
    #[serde(default)]
    pub value: Vec<ArmMetric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmMetric {
    #[serde(default)]
    pub name: Option<ArmMetricName>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub timeseries: Vec<ArmTimeSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmMetricName {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub localized_value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArmTimeSeries {
    #[serde(default)]
    pub data: Vec<ArmMetricValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmMetricValue {
    #[serde(default)]
    pub time_stamp: Option<String>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
}
