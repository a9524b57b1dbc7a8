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

use crate::error::OperationResult;
use crate::model::*;
use async_trait::async_trait;
use std::fmt::Debug;

/// Operations on App Service web apps.
///
/// Every method reports failures through [`crate::OperationError`]; a
/// transport error never escapes in any other way. Implementations are
/// cheap to share and every method may run concurrently with the others.
#[async_trait]
pub trait AppServiceApi: Debug + Send + Sync + 'static {
    /// List the web apps of the configured resource group.
    async fn list_web_apps(&self) -> OperationResult<Vec<WebApp>>;

    /// Fetch one web app, `None` if it does not exist.
    async fn get_web_app(&self, name: &str) -> OperationResult<Option<WebApp>>;

    /// Create a web app on an existing plan.
    async fn create_web_app(&self, req: &CreateWebAppRequest) -> OperationResult<WebApp>;

    /// Apply the mutable settings of `app`.
    async fn update_web_app(&self, app: &WebApp) -> OperationResult<WebApp>;

    /// Delete a web app.
    async fn delete_web_app(&self, name: &str) -> OperationResult<()>;

    /// Start a web app.
    async fn start_web_app(&self, name: &str) -> OperationResult<()>;

    /// Stop a web app.
    async fn stop_web_app(&self, name: &str) -> OperationResult<()>;

    /// Restart a web app.
    async fn restart_web_app(&self, name: &str) -> OperationResult<()>;

    /// App settings, sorted by name.
    async fn get_environment_variables(
        &self,
        name: &str,
    ) -> OperationResult<Vec<EnvironmentVariable>>;

    /// Replace the app settings.
    async fn save_environment_variables(
        &self,
        name: &str,
        vars: &[EnvironmentVariable],
    ) -> OperationResult<()>;

    /// Connection strings, sorted by name.
    async fn get_connection_strings(
        &self,
        name: &str,
    ) -> OperationResult<Vec<ConnectionStringEntry>>;

    /// Replace the connection strings.
    async fn save_connection_strings(
        &self,
        name: &str,
        entries: &[ConnectionStringEntry],
    ) -> OperationResult<()>;

    /// Platform metrics of a web app.
    async fn get_metrics(
        &self,
        name: &str,
        query: &MetricsQuery,
    ) -> OperationResult<Vec<MetricSeries>>;

    /// The plan hosting a web app.
    async fn get_app_service_plan(&self, name: &str) -> OperationResult<AppServicePlan>;

    /// Attach the configured user-assigned identity.
    async fn assign_identity(&self, name: &str) -> OperationResult<()>;

    /// Detach managed identities. Succeeds without a call when no identity is configured.
    async fn remove_identity(&self, name: &str) -> OperationResult<()>;

    /// Install a site extension.
    async fn install_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<()>;

    /// Returns true if the site extension is installed.
    async fn check_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<bool>;

    /// Remove a site extension; a missing extension is not a failure.
    async fn uninstall_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<UninstallOutcome>;

    /// Deployment credentials and the deployment endpoint.
    async fn get_publishing_credentials(
        &self,
        name: &str,
    ) -> OperationResult<PublishingCredentials>;
}
