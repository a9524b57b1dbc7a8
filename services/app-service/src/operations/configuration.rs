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

use super::site_path;
use super::web_app::get_site;
use crate::arm::{ArmConnectionStringDictionary, ArmStringDictionary};
use crate::client::ArmClient;
use crate::error::{OperationError, OperationResult};
use crate::mapper::{scm_url_from_host_names, to_connection_strings, to_environment_variables};
use crate::model::{ConnectionStringEntry, EnvironmentVariable, PublishingCredentials};
use crate::publish_profile::parse_publish_profile;
use http::Method;
use log::{debug, warn};
use serde_json::{json, Map, Value};

/// App settings of a web app, sorted by name.
///
/// Uses the `list` action since a plain GET redacts values.
pub async fn get_environment_variables(
    client: &ArmClient,
    name: &str,
) -> OperationResult<Vec<EnvironmentVariable>> {
    let path = site_path(client, "get_environment_variables", name)?;
    let resp = client
        .send(Method::POST, &format!("{path}/config/appsettings/list"), None)
        .await?
        .success()?;
    let dict: ArmStringDictionary = resp.json()?;
    Ok(to_environment_variables(&dict))
}

/// Replace the app settings of a web app.
pub async fn save_environment_variables(
    client: &ArmClient,
    name: &str,
    vars: &[EnvironmentVariable],
) -> OperationResult<()> {
    let path = site_path(client, "save_environment_variables", name)?;

    let properties: Map<String, Value> = vars
        .iter()
        .map(|v| (v.name.clone(), Value::from(v.value.as_str())))
        .collect();
    let body = json!({ "properties": properties });

    client
        .send(Method::PUT, &format!("{path}/config/appsettings"), Some(&body))
        .await?
        .success()?;
    debug!("saved {} app settings of {name}", vars.len());
    Ok(())
}

/// Connection strings of a web app, sorted by name.
pub async fn get_connection_strings(
    client: &ArmClient,
    name: &str,
) -> OperationResult<Vec<ConnectionStringEntry>> {
    let path = site_path(client, "get_connection_strings", name)?;
    let resp = client
        .send(
            Method::POST,
            &format!("{path}/config/connectionstrings/list"),
            None,
        )
        .await?
        .success()?;
    let dict: ArmConnectionStringDictionary = resp.json()?;
    Ok(to_connection_strings(&dict))
}

/// Replace the connection strings of a web app.
pub async fn save_connection_strings(
    client: &ArmClient,
    name: &str,
    entries: &[ConnectionStringEntry],
) -> OperationResult<()> {
    let path = site_path(client, "save_connection_strings", name)?;

    let properties: Map<String, Value> = entries
        .iter()
        .map(|e| {
            (
                e.name.clone(),
                json!({ "value": e.value, "type": e.connection_type }),
            )
        })
        .collect();
    let body = json!({ "properties": properties });

    client
        .send(
            Method::PUT,
            &format!("{path}/config/connectionstrings"),
            Some(&body),
        )
        .await?
        .success()?;
    debug!("saved {} connection strings of {name}", entries.len());
    Ok(())
}

/// Deployment credentials of a web app.
///
/// When the publish profile carries no deployment url, the first enabled
/// host name containing `.scm.` is used instead.
pub async fn get_publishing_credentials(
    client: &ArmClient,
    name: &str,
) -> OperationResult<PublishingCredentials> {
    let path = site_path(client, "get_publishing_credentials", name)?;
    let resp = client
        .send(
            Method::POST,
            &format!("{path}/publishxml"),
            Some(&json!({ "format": "WebDeploy" })),
        )
        .await?
        .success()?;

    let mut creds = parse_publish_profile(&resp.body).ok_or_else(|| {
        OperationError::Parse(format!("{} {}: no usable publish profile", resp.method, resp.url))
    })?;

    if creds.scm_url.is_none() {
        match get_site(client, "get_publishing_credentials", name).await {
            Ok(Some(site)) => {
                let hosts = site
                    .properties
                    .and_then(|p| p.enabled_host_names)
                    .unwrap_or_default();
                creds.scm_url = scm_url_from_host_names(&hosts);
            }
            Ok(None) => warn!("web app {name} vanished while resolving its deployment url"),
            Err(err) => warn!("failed to resolve deployment url of {name}: {err}"),
        }
    }

    Ok(creds)
}
