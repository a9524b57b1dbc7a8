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

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use appsvc_core::*;

/// Credential providers and the certificate loader.
pub mod identity {
    pub use appsvc_azure_identity::*;
}

/// App Service operations over the resource manager.
pub mod app_service {
    pub use appsvc_app_service::*;
}

#[cfg(feature = "default-context")]
mod connect;
#[cfg(feature = "default-context")]
pub use connect::{connect, connect_from_env, credential_strategy, default_context};
