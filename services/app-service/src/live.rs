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

use crate::api::AppServiceApi;
use crate::client::ArmClient;
use crate::error::OperationResult;
use crate::model::*;
use crate::operations;
use async_trait::async_trait;

/// [`AppServiceApi`] backed by the resource manager.
#[derive(Debug, Clone)]
pub struct ArmAppService {
    client: ArmClient,
}

impl ArmAppService {
    /// Create a live backend over `client`.
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// Underlying client.
    pub fn client(&self) -> &ArmClient {
        &self.client
    }
}

#[async_trait]
impl AppServiceApi for ArmAppService {
    async fn list_web_apps(&self) -> OperationResult<Vec<WebApp>> {
        operations::list_web_apps(&self.client).await
    }

    async fn get_web_app(&self, name: &str) -> OperationResult<Option<WebApp>> {
        operations::get_web_app(&self.client, name).await
    }

    async fn create_web_app(&self, req: &CreateWebAppRequest) -> OperationResult<WebApp> {
        operations::create_web_app(&self.client, req).await
    }

    async fn update_web_app(&self, app: &WebApp) -> OperationResult<WebApp> {
        operations::update_web_app(&self.client, app).await
    }

    async fn delete_web_app(&self, name: &str) -> OperationResult<()> {
        operations::delete_web_app(&self.client, name).await
    }

    async fn start_web_app(&self, name: &str) -> OperationResult<()> {
        operations::start_web_app(&self.client, name).await
    }

    async fn stop_web_app(&self, name: &str) -> OperationResult<()> {
        operations::stop_web_app(&self.client, name).await
    }

    async fn restart_web_app(&self, name: &str) -> OperationResult<()> {
        operations::restart_web_app(&self.client, name).await
    }

    async fn get_environment_variables(
        &self,
        name: &str,
    ) -> OperationResult<Vec<EnvironmentVariable>> {
        operations::get_environment_variables(&self.client, name).await
    }

    async fn save_environment_variables(
        &self,
        name: &str,
        vars: &[EnvironmentVariable],
    ) -> OperationResult<()> {
        operations::save_environment_variables(&self.client, name, vars).await
    }

    async fn get_connection_strings(
        &self,
        name: &str,
    ) -> OperationResult<Vec<ConnectionStringEntry>> {
        operations::get_connection_strings(&self.client, name).await
    }

    async fn save_connection_strings(
        &self,
        name: &str,
        entries: &[ConnectionStringEntry],
    ) -> OperationResult<()> {
        operations::save_connection_strings(&self.client, name, entries).await
    }

    async fn get_metrics(
        &self,
        name: &str,
        query: &MetricsQuery,
    ) -> OperationResult<Vec<MetricSeries>> {
        operations::get_metrics(&self.client, name, query).await
    }

    async fn get_app_service_plan(&self, name: &str) -> OperationResult<AppServicePlan> {
        operations::get_app_service_plan(&self.client, name).await
    }

    async fn assign_identity(&self, name: &str) -> OperationResult<()> {
        operations::assign_identity(&self.client, name).await
    }

    async fn remove_identity(&self, name: &str) -> OperationResult<()> {
        operations::remove_identity(&self.client, name).await
    }

    async fn install_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<()> {
        operations::install_site_extension(&self.client, name, extension).await
    }

    async fn check_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<bool> {
        operations::check_site_extension(&self.client, name, extension).await
    }

    async fn uninstall_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<UninstallOutcome> {
        operations::uninstall_site_extension(&self.client, name, extension).await
    }

    async fn get_publishing_credentials(
        &self,
        name: &str,
    ) -> OperationResult<PublishingCredentials> {
        operations::get_publishing_credentials(&self.client, name).await
    }
}
