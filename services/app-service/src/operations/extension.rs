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
use crate::client::ArmClient;
use crate::constants::SITE_EXTENSION_API_VERSION;
use crate::error::OperationResult;
use crate::model::{SiteExtension, UninstallOutcome};
use http::Method;
use log::{debug, info};
use serde_json::json;

fn extension_path(
    client: &ArmClient,
    operation: &str,
    name: &str,
    extension: SiteExtension,
) -> OperationResult<String> {
    let site = site_path(client, operation, name)?;
    Ok(format!("{site}/siteextensions/{}", extension.id()))
}

/// Install a site extension.
pub async fn install_site_extension(
    client: &ArmClient,
    name: &str,
    extension: SiteExtension,
) -> OperationResult<()> {
    let path = extension_path(client, "install_site_extension", name, extension)?;
    client
        .send_with_api_version(
            Method::PUT,
            &path,
            Some(&json!({})),
            SITE_EXTENSION_API_VERSION,
        )
        .await?
        .success()?;
    info!("installed {} on {name}", extension.id());
    Ok(())
}

/// Returns true if the site extension is installed.
pub async fn check_site_extension(
    client: &ArmClient,
    name: &str,
    extension: SiteExtension,
) -> OperationResult<bool> {
    let path = extension_path(client, "check_site_extension", name, extension)?;
    let resp = client
        .send_with_api_version(Method::GET, &path, None, SITE_EXTENSION_API_VERSION)
        .await?;

    if resp.is_not_found() {
        return Ok(false);
    }
    resp.success()?;
    Ok(true)
}

/// Remove a site extension. A 404 means it is already gone.
pub async fn uninstall_site_extension(
    client: &ArmClient,
    name: &str,
    extension: SiteExtension,
) -> OperationResult<UninstallOutcome> {
    let path = extension_path(client, "uninstall_site_extension", name, extension)?;
    let resp = client
        .send_with_api_version(Method::DELETE, &path, None, SITE_EXTENSION_API_VERSION)
        .await?;

    if resp.is_not_found() {
        debug!("{} is not installed on {name}", extension.id());
        return Ok(UninstallOutcome::AlreadyAbsent);
    }
    resp.success()?;
    Ok(UninstallOutcome::Removed)
}
