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
use crate::error::{OperationError, OperationResult};
use http::Method;
use log::{debug, warn};
use serde_json::{json, Map};

/// Attach the configured user-assigned identity to a web app.
pub async fn assign_identity(client: &ArmClient, name: &str) -> OperationResult<()> {
    let Some(identity) = configured_identity(client) else {
        warn!("assign_identity skipped: managed identity resource id is not configured");
        return Err(OperationError::ConfigurationMissing(
            "managed_identity_resource_id",
        ));
    };
    let path = site_path(client, "assign_identity", name)?;

    let mut assigned = Map::new();
    assigned.insert(identity.to_string(), json!({}));
    let body = json!({
        "identity": {
            "type": "UserAssigned",
            "userAssignedIdentities": assigned,
        }
    });
    client
        .send(Method::PATCH, &path, Some(&body))
        .await?
        .success()?;
    Ok(())
}

/// Detach managed identities from a web app.
///
/// Nothing is sent when no identity is configured.
pub async fn remove_identity(client: &ArmClient, name: &str) -> OperationResult<()> {
    if configured_identity(client).is_none() {
        debug!("remove_identity on {name}: no managed identity configured, nothing to do");
        return Ok(());
    }
    let path = site_path(client, "remove_identity", name)?;

    let body = json!({ "identity": { "type": "None" } });
    client
        .send(Method::PATCH, &path, Some(&body))
        .await?
        .success()?;
    Ok(())
}

fn configured_identity(client: &ArmClient) -> Option<&str> {
    client
        .config()
        .managed_identity_resource_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
