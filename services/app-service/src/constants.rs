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

pub const DEFAULT_BASE_URL: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2022-03-01";
/// Site extensions are only served by a newer API version.
pub const SITE_EXTENSION_API_VERSION: &str = "2024-04-01";
pub const METRICS_API_VERSION: &str = "2018-01-01";

pub const DEFAULT_SCOPE: &str = "https://management.azure.com/.default";
pub const DEFAULT_STORE_NAME: &str = "My";
pub const DEFAULT_STORE_LOCATION: &str = "CurrentUser";

pub const KEY_VAULT_REFERENCE_PREFIX: &str = "@Microsoft.KeyVault(";
/// Host names of the deployment endpoint carry this segment, e.g. `app.scm.azurewebsites.net`.
pub const SCM_HOST_MARKER: &str = ".scm.";

// Env values read by `Config::from_env`.
pub const APPSVC_ARM_BASE_URL: &str = "APPSVC_ARM_BASE_URL";
pub const APPSVC_ARM_API_VERSION: &str = "APPSVC_ARM_API_VERSION";
pub const AZURE_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const APPSVC_RESOURCE_GROUP: &str = "APPSVC_RESOURCE_GROUP";
pub const APPSVC_AUTH_TYPE: &str = "APPSVC_AUTH_TYPE";
pub const APPSVC_ARM_SCOPE: &str = "APPSVC_ARM_SCOPE";
pub const APPSVC_CERT_THUMBPRINT: &str = "APPSVC_CERT_THUMBPRINT";
pub const APPSVC_CERT_STORE_NAME: &str = "APPSVC_CERT_STORE_NAME";
pub const APPSVC_CERT_STORE_LOCATION: &str = "APPSVC_CERT_STORE_LOCATION";
pub const APPSVC_MANAGED_IDENTITY_ID: &str = "APPSVC_MANAGED_IDENTITY_ID";
pub const APPSVC_MODE: &str = "APPSVC_MODE";
