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

//! Publish profile (`publishxml`) parsing.

use crate::model::PublishingCredentials;
use log::error;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct PublishData {
    #[serde(rename = "publishProfile", default)]
    profiles: Vec<PublishProfile>,
}

#[derive(Debug, Default, Deserialize)]
struct PublishProfile {
    #[serde(rename = "@publishMethod", default)]
    publish_method: Option<String>,
    #[serde(rename = "@userName", default)]
    user_name: Option<String>,
    #[serde(rename = "@userPWD", default)]
    password: Option<String>,
    #[serde(rename = "@publishUrl", default)]
    publish_url: Option<String>,
}

impl PublishProfile {
    fn has_credentials(&self) -> bool {
        non_empty(&self.user_name).is_some() && non_empty(&self.password).is_some()
    }
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|v| !v.is_empty())
}

/// Parse a publish profile document into deployment credentials.
///
/// The `MSDeploy` profile is used when present, otherwise the first profile
/// carrying both a user name and a password. Returns `None` (and logs) for
/// malformed documents or when no usable profile exists. `scm_url` is unset
/// when the chosen profile has no `publishUrl`.
pub fn parse_publish_profile(xml: &str) -> Option<PublishingCredentials> {
    let data: PublishData = match quick_xml::de::from_str(xml) {
        Ok(data) => data,
        Err(err) => {
            error!("publish profile is not valid xml: {err}");
            return None;
        }
    };

    let profile = data
        .profiles
        .iter()
        .find(|p| {
            p.publish_method
                .as_deref()
                .is_some_and(|m| m.eq_ignore_ascii_case("MSDeploy"))
        })
        .or_else(|| data.profiles.iter().find(|p| p.has_credentials()));

    let Some(profile) = profile else {
        error!(
            "publish profile has no usable profile among {} entries",
            data.profiles.len()
        );
        return None;
    };

    let (Some(user_name), Some(password)) =
        (non_empty(&profile.user_name), non_empty(&profile.password))
    else {
        error!("publish profile is missing userName or userPWD");
        return None;
    };

    Some(PublishingCredentials {
        user_name: user_name.to_string(),
        password: password.to_string(),
        scm_url: profile.publish_url.as_deref().and_then(scm_url_from_publish_url),
    })
}

/// Turn `host:port` into `https://host`.
pub fn scm_url_from_publish_url(publish_url: &str) -> Option<String> {
    let url = publish_url.trim().trim_end_matches('/');
    if url.is_empty() {
        return None;
    }

    let host = match url.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            host
        }
        _ => url,
    };

    if host.starts_with("https://") || host.starts_with("http://") {
        Some(host.to_string())
    } else {
        Some(format!("https://{host}"))
    }
}
