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

//! Control plane operations as free functions over an [`ArmClient`].

mod configuration;
pub use configuration::*;

mod extension;
pub use extension::*;

mod identity;
pub use identity::*;

mod metrics;
pub use metrics::*;

mod web_app;
pub use web_app::*;

use crate::client::ArmClient;
use crate::error::{OperationError, OperationResult};
use log::warn;

/// Resource group path, or a logged configuration-missing failure.
fn resource_group_path(client: &ArmClient, operation: &str) -> OperationResult<String> {
    if client.subscription_path().is_none() {
        warn!("{operation} skipped: subscription id is not configured");
        return Err(OperationError::ConfigurationMissing("subscription_id"));
    }
    client.resource_group_path().ok_or_else(|| {
        warn!("{operation} skipped: resource group is not configured");
        OperationError::ConfigurationMissing("resource_group")
    })
}

/// Site path, or a logged configuration-missing failure.
fn site_path(client: &ArmClient, operation: &str, name: &str) -> OperationResult<String> {
    resource_group_path(client, operation)?;
    client.site_path(name).ok_or_else(|| {
        warn!("{operation} skipped: resource group is not configured");
        OperationError::ConfigurationMissing("resource_group")
    })
}
