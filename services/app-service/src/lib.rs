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

//! App Service web app management over Azure Resource Manager.
//!
//! [`ArmClient`] sends requests to the control plane with a
//! [`CredentialStrategy`] picked once at start-up. The functions in
//! [`operations`] build resource paths, call the client and map responses
//! into the models in [`model`]. [`AppServiceApi`] is the surface handed to
//! callers, with a live ([`ArmAppService`]) and an in-memory
//! ([`OfflineAppService`]) implementation.

mod constants;
pub use constants::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, METRICS_API_VERSION, SITE_EXTENSION_API_VERSION,
};

mod config;
pub use config::{AuthType, CertificateConfig, Config, Mode};

mod error;
pub use error::{OperationError, OperationResult};

pub mod arm;
pub mod mapper;
pub mod model;
pub use model::*;

mod publish_profile;
pub use publish_profile::{parse_publish_profile, scm_url_from_publish_url};

mod client;
pub use client::{arm_url, ArmClient, ArmResponse, CredentialStrategy};

mod api;
pub use api::AppServiceApi;

pub mod operations;

mod live;
pub use live::ArmAppService;

mod offline;
pub use offline::OfflineAppService;
