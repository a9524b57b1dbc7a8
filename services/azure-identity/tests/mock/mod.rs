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

use appsvc_core::{CommandExecute, CommandOutput, Error, HttpSend, Result, StaticEnv};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Replies to every request with the next queued response and records the request.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    responses: Arc<Mutex<Vec<(u16, String)>>>,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((status, body.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<(String, String, String)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| {
                (
                    r.method().to_string(),
                    r.uri().to_string(),
                    String::from_utf8_lossy(r.body()).to_string(),
                )
            })
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.requests.lock().unwrap().push(req);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::unexpected("no response queued"));
        }
        let (status, body) = responses.remove(0);
        Ok(http::Response::builder()
            .status(status)
            .body(Bytes::from(body))
            .unwrap())
    }
}

/// Answers commands from a fixed table keyed by program name.
#[derive(Debug, Clone, Default)]
pub struct MockCommandExecute {
    outputs: HashMap<String, CommandOutput>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockCommandExecute {
    pub fn with(mut self, program: &str, status: i32, stdout: &str, stderr: &str) -> Self {
        self.outputs.insert(
            program.to_string(),
            CommandOutput {
                status,
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecute for MockCommandExecute {
    async fn command_execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{program} {}", args.join(" ")));

        self.outputs
            .get(program)
            .cloned()
            .ok_or_else(|| Error::unexpected(format!("{program}: command not found")))
    }
}

pub fn static_env(envs: &[(&str, &str)]) -> StaticEnv {
    StaticEnv {
        home_dir: None,
        envs: envs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}
