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

use thiserror::Error;

/// Failure arm of every App Service operation.
#[derive(Error, Debug)]
pub enum OperationError {
    /// A required identifier is not configured.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(&'static str),

    /// The control plane answered with a non-success status.
    #[error("{method} {url} failed with status {status}: {body}")]
    Http {
        /// Request method.
        method: http::Method,
        /// Full request url, including the api version.
        url: String,
        /// Response status.
        status: http::StatusCode,
        /// Raw response body.
        body: String,
    },

    /// No credential could be acquired or applied.
    #[error("credential failure: {0}")]
    Credential(#[source] appsvc_core::Error),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(#[source] appsvc_core::Error),

    /// The response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),

    /// The named resource does not exist.
    #[error("{0} not found")]
    NotFound(String),
}

impl OperationError {
    /// Status code of an HTTP failure.
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            OperationError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this failure came from credential acquisition.
    pub fn is_credential(&self) -> bool {
        matches!(self, OperationError::Credential(_))
    }
}

impl From<appsvc_core::Error> for OperationError {
    fn from(err: appsvc_core::Error) -> Self {
        if err.is_credential_error() {
            OperationError::Credential(err)
        } else {
            OperationError::Transport(err)
        }
    }
}

/// Result of an App Service operation.
pub type OperationResult<T> = std::result::Result<T, OperationError>;
