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

//! Pure translation of resource manager JSON into domain models.

use crate::arm::*;
use crate::constants::KEY_VAULT_REFERENCE_PREFIX;
use crate::model::*;
use appsvc_core::time::{parse_rfc3339, DateTime};
use std::collections::BTreeMap;

/// Extract the resource group from a resource id.
///
/// Locates the segment equal to `resourceGroups` (any case) and returns the
/// segment after it, or an empty string.
pub fn resource_group_from_id(id: &str) -> String {
    let mut segments = id.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case("resourceGroups") {
            return segments.next().unwrap_or_default().to_string();
        }
    }
    String::new()
}

/// Normalize a reported site state.
pub fn normalize_state(state: Option<&str>) -> SiteState {
    match state {
        None => SiteState::Unknown,
        Some(v) if v.eq_ignore_ascii_case("running") => SiteState::Running,
        Some(v) if v.eq_ignore_ascii_case("stopped") => SiteState::Stopped,
        Some(v) => SiteState::Other(v.to_string()),
    }
}

/// Describe the runtime of a site, first match wins.
pub fn detect_runtime(config: Option<&SiteConfig>, kind: Option<&str>) -> String {
    let Some(config) = config else {
        return "Unknown".to_string();
    };

    fn set(v: &Option<String>) -> Option<&str> {
        v.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    if let Some(v) = set(&config.linux_fx_version) {
        return v.to_string();
    }
    if let Some(v) = set(&config.windows_fx_version) {
        return v.to_string();
    }
    if let Some(v) = set(&config.java_version) {
        return format!("Java {v}");
    }
    if let Some(v) = set(&config.python_version) {
        return format!("Python {v}");
    }
    if let Some(v) = set(&config.node_version) {
        return format!("Node {v}");
    }
    if let Some(v) = set(&config.php_version) {
        return format!("PHP {v}");
    }
    if let Some(v) = set(&config.net_framework_version) {
        return format!(".NET {v}");
    }

    let kind = kind.unwrap_or_default().to_ascii_lowercase();
    if kind.contains("linux") {
        "Linux".to_string()
    } else if kind.contains("functionapp") {
        "Function App".to_string()
    } else {
        "Windows".to_string()
    }
}

/// Classify a setting value.
pub fn classify_source(value: &str) -> ValueSource {
    let is_reference = value
        .get(..KEY_VAULT_REFERENCE_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(KEY_VAULT_REFERENCE_PREFIX));

    if is_reference {
        ValueSource::KeyVaultReference
    } else {
        ValueSource::AppService
    }
}

fn lenient_time(value: Option<&str>) -> Option<DateTime> {
    value.and_then(|v| parse_rfc3339(v).ok())
}

fn identity_summary(identity: &ArmIdentity) -> IdentitySummary {
    let mut ids: Vec<String> = identity
        .user_assigned_identities
        .as_ref()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    ids.sort();

    IdentitySummary {
        identity_type: identity
            .identity_type
            .clone()
            .unwrap_or_else(|| "None".to_string()),
        user_assigned_identities: ids,
    }
}

/// Map a site resource into a [`WebApp`].
pub fn to_web_app(site: &ArmSite) -> WebApp {
    let empty = SiteProperties::default();
    let props = site.properties.as_ref().unwrap_or(&empty);
    let config = props.site_config.as_ref();

    let name = site.name.clone().unwrap_or_default();
    let resource_group = props
        .resource_group
        .clone()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| resource_group_from_id(site.id.as_deref().unwrap_or_default()));

    let url = props
        .default_host_name
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|host| format!("https://{host}"))
        .unwrap_or_default();

    let http20 = config.and_then(|c| c.http20_enabled).unwrap_or(false);

    WebApp {
        id: name.clone(),
        name,
        arm_id: site.id.clone(),
        resource_group,
        location: site.location.clone().unwrap_or_default(),
        kind: site.kind.clone(),
        status: normalize_state(props.state.as_deref()),
        url,
        https_only: props.https_only.unwrap_or(false),
        http_version: if http20 { "2.0" } else { "1.1" }.to_string(),
        web_sockets_enabled: config.and_then(|c| c.web_sockets_enabled).unwrap_or(false),
        always_on: config.and_then(|c| c.always_on).unwrap_or(false),
        current_instances: config.and_then(|c| c.number_of_workers).unwrap_or(1),
        runtime: detect_runtime(config, site.kind.as_deref()),
        app_service_plan_id: props.server_farm_id.clone(),
        enabled_host_names: props.enabled_host_names.clone().unwrap_or_default(),
        tags: site.tags.clone().unwrap_or_default(),
        identity: site.identity.as_ref().map(identity_summary),
        created_date: lenient_time(
            site.system_data
                .as_ref()
                .and_then(|s| s.created_at.as_deref()),
        ),
        last_modified_date: lenient_time(props.last_modified_time_utc.as_deref()).or_else(|| {
            lenient_time(
                site.system_data
                    .as_ref()
                    .and_then(|s| s.last_modified_at.as_deref()),
            )
        }),
        app_settings: BTreeMap::new(),
        connection_strings: BTreeMap::new(),
    }
}

/// Map `config/appsettings/list` into settings sorted by name.
pub fn to_environment_variables(dict: &ArmStringDictionary) -> Vec<EnvironmentVariable> {
    // BTreeMap iteration is already sorted by name.
    dict.properties
        .iter()
        .flatten()
        .map(|(name, value)| environment_variable(name, value.as_deref().unwrap_or_default()))
        .collect()
}

/// Build one setting, classifying its value.
pub fn environment_variable(name: &str, value: &str) -> EnvironmentVariable {
    let source = classify_source(value);
    EnvironmentVariable {
        name: name.to_string(),
        value: value.to_string(),
        source,
        is_slot_setting: false,
        is_value_hidden: source == ValueSource::KeyVaultReference,
    }
}

/// Map `config/connectionstrings/list` into entries sorted by name.
pub fn to_connection_strings(dict: &ArmConnectionStringDictionary) -> Vec<ConnectionStringEntry> {
    dict.properties
        .iter()
        .flatten()
        .map(|(name, cs)| {
            connection_string(
                name,
                cs.value.as_deref().unwrap_or_default(),
                cs.connection_type.as_deref(),
            )
        })
        .collect()
}

/// Build one connection string entry, `Custom` when no type is given.
pub fn connection_string(
    name: &str,
    value: &str,
    connection_type: Option<&str>,
) -> ConnectionStringEntry {
    let source = classify_source(value);
    ConnectionStringEntry {
        name: name.to_string(),
        value: value.to_string(),
        connection_type: connection_type
            .filter(|v| !v.is_empty())
            .unwrap_or("Custom")
            .to_string(),
        source,
        is_slot_setting: false,
        is_value_hidden: source == ValueSource::KeyVaultReference,
    }
}

/// Map an App Service plan resource.
pub fn to_app_service_plan(plan: &ArmPlan) -> AppServicePlan {
    let sku = plan.sku.clone().unwrap_or_default();
    let props = plan.properties.clone().unwrap_or_default();

    AppServicePlan {
        id: plan.id.clone().unwrap_or_default(),
        name: plan.name.clone().unwrap_or_default(),
        location: plan.location.clone().unwrap_or_default(),
        kind: plan.kind.clone(),
        status: props.status.unwrap_or_else(|| "Unknown".to_string()),
        number_of_sites: props.number_of_sites.unwrap_or_default(),
        pricing_tier: PricingTier {
            name: sku.name.unwrap_or_default(),
            tier: sku.tier.unwrap_or_default(),
            size: sku.size.unwrap_or_default(),
            family: sku.family.unwrap_or_default(),
            capacity: sku.capacity.unwrap_or(1),
        },
    }
}

/// Map a metrics response, one series per metric.
pub fn to_metric_series(resp: &ArmMetricResponse) -> Vec<MetricSeries> {
    resp.value
        .iter()
        .map(|metric| {
            let name = metric
                .name
                .as_ref()
                .and_then(|n| n.value.clone().or_else(|| n.localized_value.clone()))
                .unwrap_or_default();
            let points = metric
                .timeseries
                .iter()
                .flat_map(|ts| ts.data.iter())
                .map(|v| MetricPoint {
                    timestamp: lenient_time(v.time_stamp.as_deref()),
                    average: v.average,
                    total: v.total,
                    maximum: v.maximum,
                })
                .collect();

            MetricSeries {
                name,
                unit: metric.unit.clone().unwrap_or_default(),
                points,
            }
        })
        .collect()
}

/// First enabled host name that is a deployment endpoint, as an https url.
pub fn scm_url_from_host_names(host_names: &[String]) -> Option<String> {
    host_names
        .iter()
        .find(|host| host.contains(crate::constants::SCM_HOST_MARKER))
        .map(|host| format!("https://{host}"))
}
