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

use super::{resource_group_path, site_path};
use crate::arm::{ArmList, ArmPlan, ArmSite};
use crate::client::ArmClient;
use crate::error::{OperationError, OperationResult};
use crate::mapper::{to_app_service_plan, to_web_app};
use crate::model::{AppServicePlan, CreateWebAppRequest, WebApp};
use http::Method;
use log::{debug, error};
use serde_json::{json, Map, Value};

/// List the web apps of the configured resource group, following `nextLink`.
pub async fn list_web_apps(client: &ArmClient) -> OperationResult<Vec<WebApp>> {
    let rg = resource_group_path(client, "list_web_apps")?;

    let mut apps = Vec::new();
    let mut next = Some(format!("{rg}/providers/Microsoft.Web/sites"));
    while let Some(path) = next.take() {
        let resp = client.send(Method::GET, &path, None).await?.success()?;
        let page: ArmList<ArmSite> = resp.json()?;
        apps.extend(page.value.iter().map(to_web_app));
        next = page.next_link.filter(|v| !v.is_empty());
        if let Some(link) = next.as_deref().filter(|v| client.is_foreign(v)) {
            error!(
                "list_web_apps: nextLink {link} is outside {}",
                client.config().base_url
            );
            return Err(OperationError::Parse(format!(
                "nextLink {link} is outside {}",
                client.config().base_url
            )));
        }
    }

    debug!("listed {} web apps", apps.len());
    Ok(apps)
}

/// Fetch the raw site resource, `None` on 404.
pub(crate) async fn get_site(
    client: &ArmClient,
    operation: &str,
    name: &str,
) -> OperationResult<Option<ArmSite>> {
    let path = site_path(client, operation, name)?;
    let resp = client.send(Method::GET, &path, None).await?;
    if resp.is_not_found() {
        debug!("web app {name} does not exist");
        return Ok(None);
    }
    Ok(Some(resp.success()?.json()?))
}

/// Fetch one web app, `None` if it does not exist.
pub async fn get_web_app(client: &ArmClient, name: &str) -> OperationResult<Option<WebApp>> {
    Ok(get_site(client, "get_web_app", name)
        .await?
        .as_ref()
        .map(to_web_app))
}

/// Create a web app.
pub async fn create_web_app(
    client: &ArmClient,
    req: &CreateWebAppRequest,
) -> OperationResult<WebApp> {
    let path = site_path(client, "create_web_app", &req.name)?;

    let mut site_config = Map::new();
    site_config.insert("http20Enabled".into(), req.http20_enabled.into());
    site_config.insert("alwaysOn".into(), req.always_on.into());
    if let Some(fx) = &req.linux_fx_version {
        site_config.insert("linuxFxVersion".into(), fx.as_str().into());
    }
    if !req.app_settings.is_empty() {
        let settings: Vec<Value> = req
            .app_settings
            .iter()
            .map(|(name, value)| json!({"name": name, "value": value}))
            .collect();
        site_config.insert("appSettings".into(), settings.into());
    }

    let body = json!({
        "location": req.location,
        "kind": req.kind.as_deref().unwrap_or("app"),
        "properties": {
            "serverFarmId": req.app_service_plan_id,
            "httpsOnly": req.https_only,
            "siteConfig": site_config,
        }
    });

    let resp = client
        .send(Method::PUT, &path, Some(&body))
        .await?
        .success()?;
    Ok(to_web_app(&resp.json::<ArmSite>()?))
}

/// Apply the mutable settings of `app`.
///
/// `linuxFxVersion` is only sent for Linux sites whose runtime is a
/// `STACK|version` string.
pub async fn update_web_app(client: &ArmClient, app: &WebApp) -> OperationResult<WebApp> {
    let path = site_path(client, "update_web_app", &app.name)?;

    let mut site_config = Map::new();
    site_config.insert("http20Enabled".into(), (app.http_version == "2.0").into());
    site_config.insert("webSocketsEnabled".into(), app.web_sockets_enabled.into());
    site_config.insert("alwaysOn".into(), app.always_on.into());
    let is_linux = app
        .kind
        .as_deref()
        .is_some_and(|k| k.to_ascii_lowercase().contains("linux"));
    if is_linux && app.runtime.contains('|') {
        site_config.insert("linuxFxVersion".into(), app.runtime.as_str().into());
    }

    let body = json!({
        "tags": app.tags,
        "properties": {
            "httpsOnly": app.https_only,
            "siteConfig": site_config,
        }
    });

    let resp = client
        .send(Method::PATCH, &path, Some(&body))
        .await?
        .success()?;
    Ok(to_web_app(&resp.json::<ArmSite>()?))
}

/// Delete a web app. A 404 is reported like any other failure.
pub async fn delete_web_app(client: &ArmClient, name: &str) -> OperationResult<()> {
    let path = site_path(client, "delete_web_app", name)?;
    client.send(Method::DELETE, &path, None).await?.success()?;
    Ok(())
}

async fn site_action(client: &ArmClient, name: &str, action: &str) -> OperationResult<()> {
    let path = site_path(client, action, name)?;
    client
        .send(Method::POST, &format!("{path}/{action}"), None)
        .await?
        .success()?;
    Ok(())
}

/// Start a web app.
pub async fn start_web_app(client: &ArmClient, name: &str) -> OperationResult<()> {
    site_action(client, name, "start").await
}

/// Stop a web app.
pub async fn stop_web_app(client: &ArmClient, name: &str) -> OperationResult<()> {
    site_action(client, name, "stop").await
}

/// Restart a web app.
pub async fn restart_web_app(client: &ArmClient, name: &str) -> OperationResult<()> {
    site_action(client, name, "restart").await
}

/// Fetch the plan hosting a web app.
pub async fn get_app_service_plan(
    client: &ArmClient,
    name: &str,
) -> OperationResult<AppServicePlan> {
    let site = get_site(client, "get_app_service_plan", name)
        .await?
        .ok_or_else(|| OperationError::NotFound(format!("web app {name}")))?;

    let plan_id = site
        .properties
        .and_then(|p| p.server_farm_id)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| OperationError::NotFound(format!("app service plan of {name}")))?;

    let resp = client.send(Method::GET, &plan_id, None).await?;
    if resp.is_not_found() {
        return Err(OperationError::NotFound(plan_id));
    }
    let plan: ArmPlan = resp.success()?.json()?;
    Ok(to_app_service_plan(&plan))
}
