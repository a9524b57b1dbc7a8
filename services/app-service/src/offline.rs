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

//! In-memory backend for demos and for running without a subscription.

use crate::api::AppServiceApi;
use crate::error::{OperationError, OperationResult};
use crate::mapper::{connection_string, environment_variable, scm_url_from_host_names};
use crate::model::*;
use appsvc_core::time::now;
use async_trait::async_trait;
use chrono::Duration;
use log::debug;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

const DEMO_RESOURCE_GROUP: &str = "rg-appsvc-demo";
const DEMO_PLAN_ID: &str =
    "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/rg-appsvc-demo/providers/Microsoft.Web/serverfarms/asp-demo";

#[derive(Debug, Clone)]
struct OfflineSite {
    app: WebApp,
    connection_types: BTreeMap<String, String>,
    extensions: HashSet<SiteExtension>,
}

/// [`AppServiceApi`] over an in-memory store.
///
/// Clones share the store. Values saved through it round-trip exactly, with
/// Key Vault references classified the same way as the live backend does.
#[derive(Debug, Clone)]
pub struct OfflineAppService {
    store: Arc<Mutex<BTreeMap<String, OfflineSite>>>,
    plan: AppServicePlan,
    managed_identity_resource_id: Option<String>,
}

impl Default for OfflineAppService {
    fn default() -> Self {
        Self::new()
    }
}

impl OfflineAppService {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(BTreeMap::new())),
            plan: demo_plan(),
            managed_identity_resource_id: None,
        }
    }

    /// Create a store holding two demo web apps.
    pub fn seeded() -> Self {
        let svc = Self::new();
        if let Ok(mut store) = svc.store.lock() {
            for site in demo_sites() {
                store.insert(site.app.name.clone(), site);
            }
        }
        svc
    }

    /// Identity attached by `assign_identity`.
    pub fn with_managed_identity_resource_id(mut self, id: impl Into<String>) -> Self {
        self.managed_identity_resource_id = Some(id.into());
        self
    }

    fn lock(&self) -> OperationResult<MutexGuard<'_, BTreeMap<String, OfflineSite>>> {
        self.store.lock().map_err(|_| {
            OperationError::Transport(appsvc_core::Error::unexpected(
                "offline store lock poisoned",
            ))
        })
    }

    fn with_site<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut OfflineSite) -> T,
    ) -> OperationResult<T> {
        let mut store = self.lock()?;
        let site = store
            .get_mut(name)
            .ok_or_else(|| OperationError::NotFound(format!("web app {name}")))?;
        Ok(f(site))
    }

    fn identity(&self) -> Option<&str> {
        self.managed_identity_resource_id
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }
}

#[async_trait]
impl AppServiceApi for OfflineAppService {
    async fn list_web_apps(&self) -> OperationResult<Vec<WebApp>> {
        Ok(self.lock()?.values().map(|s| s.app.clone()).collect())
    }

    async fn get_web_app(&self, name: &str) -> OperationResult<Option<WebApp>> {
        Ok(self.lock()?.get(name).map(|s| s.app.clone()))
    }

    async fn create_web_app(&self, req: &CreateWebAppRequest) -> OperationResult<WebApp> {
        let mut store = self.lock()?;
        if store.contains_key(&req.name) {
            return Err(OperationError::Http {
                method: http::Method::PUT,
                url: format!("offline://sites/{}", req.name),
                status: http::StatusCode::CONFLICT,
                body: format!("web app {} already exists", req.name),
            });
        }

        let kind = req.kind.clone().unwrap_or_else(|| "app".to_string());
        let runtime = req.linux_fx_version.clone().unwrap_or_else(|| {
            if kind.contains("linux") {
                "Linux".to_string()
            } else {
                "Windows".to_string()
            }
        });
        let mut app = demo_app(&req.name, SiteState::Running, &runtime, &kind);
        app.location = req.location.clone();
        app.app_service_plan_id = Some(req.app_service_plan_id.clone());
        app.https_only = req.https_only;
        app.http_version = if req.http20_enabled { "2.0" } else { "1.1" }.to_string();
        app.always_on = req.always_on;
        app.app_settings = req.app_settings.clone();

        store.insert(
            req.name.clone(),
            OfflineSite {
                app: app.clone(),
                connection_types: BTreeMap::new(),
                extensions: HashSet::new(),
            },
        );
        debug!("offline: created web app {}", req.name);
        Ok(app)
    }

    async fn update_web_app(&self, app: &WebApp) -> OperationResult<WebApp> {
        self.with_site(&app.name, |site| {
            site.app.https_only = app.https_only;
            site.app.http_version = app.http_version.clone();
            site.app.web_sockets_enabled = app.web_sockets_enabled;
            site.app.always_on = app.always_on;
            site.app.tags = app.tags.clone();
            site.app.last_modified_date = Some(now());
            site.app.clone()
        })
    }

    async fn delete_web_app(&self, name: &str) -> OperationResult<()> {
        self.lock()?
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| OperationError::NotFound(format!("web app {name}")))
    }

    async fn start_web_app(&self, name: &str) -> OperationResult<()> {
        self.with_site(name, |site| site.app.status = SiteState::Running)
    }

    async fn stop_web_app(&self, name: &str) -> OperationResult<()> {
        self.with_site(name, |site| site.app.status = SiteState::Stopped)
    }

    async fn restart_web_app(&self, name: &str) -> OperationResult<()> {
        self.with_site(name, |site| site.app.status = SiteState::Running)
    }

    async fn get_environment_variables(
        &self,
        name: &str,
    ) -> OperationResult<Vec<EnvironmentVariable>> {
        self.with_site(name, |site| {
            site.app
                .app_settings
                .iter()
                .map(|(k, v)| environment_variable(k, v))
                .collect()
        })
    }

    async fn save_environment_variables(
        &self,
        name: &str,
        vars: &[EnvironmentVariable],
    ) -> OperationResult<()> {
        self.with_site(name, |site| {
            site.app.app_settings = vars
                .iter()
                .map(|v| (v.name.clone(), v.value.clone()))
                .collect();
        })
    }

    async fn get_connection_strings(
        &self,
        name: &str,
    ) -> OperationResult<Vec<ConnectionStringEntry>> {
        self.with_site(name, |site| {
            site.app
                .connection_strings
                .iter()
                .map(|(k, v)| {
                    connection_string(k, v, site.connection_types.get(k).map(String::as_str))
                })
                .collect()
        })
    }

    async fn save_connection_strings(
        &self,
        name: &str,
        entries: &[ConnectionStringEntry],
    ) -> OperationResult<()> {
        self.with_site(name, |site| {
            site.app.connection_strings = entries
                .iter()
                .map(|e| (e.name.clone(), e.value.clone()))
                .collect();
            site.connection_types = entries
                .iter()
                .map(|e| (e.name.clone(), e.connection_type.clone()))
                .collect();
        })
    }

    async fn get_metrics(
        &self,
        name: &str,
        query: &MetricsQuery,
    ) -> OperationResult<Vec<MetricSeries>> {
        let running = self.with_site(name, |site| site.app.status == SiteState::Running)?;
        let end = now();

        Ok(query
            .metric_names
            .iter()
            .enumerate()
            .map(|(idx, metric)| {
                let points = (0..3i64)
                    .map(|step| {
                        let value = if running {
                            ((idx as i64 + 1) * (step + 1)) as f64
                        } else {
                            0.0
                        };
                        MetricPoint {
                            timestamp: Some(end - Duration::minutes(5 * (2 - step))),
                            average: Some(value),
                            total: Some(value * 5.0),
                            maximum: Some(value * 2.0),
                        }
                    })
                    .collect();
                MetricSeries {
                    name: metric.clone(),
                    unit: metric_unit(metric).to_string(),
                    points,
                }
            })
            .collect())
    }

    async fn get_app_service_plan(&self, name: &str) -> OperationResult<AppServicePlan> {
        let count = self.lock()?.len() as u32;
        self.with_site(name, |_| ())?;
        Ok(AppServicePlan {
            number_of_sites: count,
            ..self.plan.clone()
        })
    }

    async fn assign_identity(&self, name: &str) -> OperationResult<()> {
        let Some(identity) = self.identity().map(str::to_string) else {
            return Err(OperationError::ConfigurationMissing(
                "managed_identity_resource_id",
            ));
        };
        self.with_site(name, |site| {
            site.app.identity = Some(IdentitySummary {
                identity_type: "UserAssigned".to_string(),
                user_assigned_identities: vec![identity],
            });
        })
    }

    async fn remove_identity(&self, name: &str) -> OperationResult<()> {
        if self.identity().is_none() {
            return Ok(());
        }
        self.with_site(name, |site| site.app.identity = None)
    }

    async fn install_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<()> {
        self.with_site(name, |site| {
            site.extensions.insert(extension);
        })
    }

    async fn check_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<bool> {
        self.with_site(name, |site| site.extensions.contains(&extension))
    }

    async fn uninstall_site_extension(
        &self,
        name: &str,
        extension: SiteExtension,
    ) -> OperationResult<UninstallOutcome> {
        self.with_site(name, |site| {
            if site.extensions.remove(&extension) {
                UninstallOutcome::Removed
            } else {
                UninstallOutcome::AlreadyAbsent
            }
        })
    }

    async fn get_publishing_credentials(
        &self,
        name: &str,
    ) -> OperationResult<PublishingCredentials> {
        self.with_site(name, |site| PublishingCredentials {
            user_name: format!("${name}"),
            password: "offline-publishing-password".to_string(),
            scm_url: scm_url_from_host_names(&site.app.enabled_host_names),
        })
    }
}

fn metric_unit(metric: &str) -> &'static str {
    match metric {
        "CpuTime" => "Seconds",
        "MemoryWorkingSet" => "Bytes",
        "AverageResponseTime" | "HttpResponseTime" => "Seconds",
        _ => "Count",
    }
}

fn demo_plan() -> AppServicePlan {
    AppServicePlan {
        id: DEMO_PLAN_ID.to_string(),
        name: "asp-demo".to_string(),
        location: "West Europe".to_string(),
        kind: Some("linux".to_string()),
        status: "Ready".to_string(),
        number_of_sites: 0,
        pricing_tier: PricingTier {
            name: "P1v3".to_string(),
            tier: "PremiumV3".to_string(),
            size: "P1v3".to_string(),
            family: "Pv3".to_string(),
            capacity: 1,
        },
    }
}

fn demo_app(name: &str, status: SiteState, runtime: &str, kind: &str) -> WebApp {
    let host = format!("{name}.azurewebsites.net");
    let scm_host = format!("{name}.scm.azurewebsites.net");

    WebApp {
        id: name.to_string(),
        name: name.to_string(),
        arm_id: Some(format!(
            "/subscriptions/00000000-0000-0000-0000-000000000000/resourceGroups/{DEMO_RESOURCE_GROUP}/providers/Microsoft.Web/sites/{name}"
        )),
        resource_group: DEMO_RESOURCE_GROUP.to_string(),
        location: "West Europe".to_string(),
        kind: Some(kind.to_string()),
        status,
        url: format!("https://{host}"),
        https_only: true,
        http_version: "2.0".to_string(),
        web_sockets_enabled: false,
        always_on: true,
        current_instances: 1,
        runtime: runtime.to_string(),
        app_service_plan_id: Some(DEMO_PLAN_ID.to_string()),
        enabled_host_names: vec![host, scm_host],
        tags: BTreeMap::new(),
        identity: None,
        created_date: Some(now() - Duration::days(30)),
        last_modified_date: Some(now() - Duration::days(1)),
        app_settings: BTreeMap::new(),
        connection_strings: BTreeMap::new(),
    }
}

fn demo_sites() -> Vec<OfflineSite> {
    let mut web = demo_app(
        "contoso-web",
        SiteState::Running,
        "NODE|18-lts",
        "app,linux",
    );
    web.tags.insert("env".to_string(), "demo".to_string());
    web.app_settings = BTreeMap::from([
        ("NODE_ENV".to_string(), "production".to_string()),
        (
            "SESSION_SECRET".to_string(),
            "@Microsoft.KeyVault(SecretUri=https://kv-demo.vault.azure.net/secrets/session)"
                .to_string(),
        ),
        ("WEBSITE_RUN_FROM_PACKAGE".to_string(), "1".to_string()),
    ]);
    web.connection_strings = BTreeMap::from([(
        "Catalog".to_string(),
        "Server=tcp:sql-demo.database.windows.net;Database=catalog".to_string(),
    )]);

    let mut api = demo_app("contoso-api", SiteState::Stopped, ".NET v8.0", "app");
    api.app_settings = BTreeMap::from([(
        "ASPNETCORE_ENVIRONMENT".to_string(),
        "Staging".to_string(),
    )]);

    vec![
        OfflineSite {
            app: web,
            connection_types: BTreeMap::from([("Catalog".to_string(), "SQLAzure".to_string())]),
            extensions: HashSet::from([SiteExtension::ApplicationInsights]),
        },
        OfflineSite {
            app: api,
            connection_types: BTreeMap::new(),
            extensions: HashSet::new(),
        },
    ]
}
