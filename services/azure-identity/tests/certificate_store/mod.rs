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

use crate::mock::static_env;
use appsvc_azure_identity::{CertificateLoader, StoreLocation};
use appsvc_core::hash::thumbprint;
use appsvc_core::time::now;
use appsvc_core::Context;
use appsvc_file_read_tokio::TokioFileRead;
use pretty_assertions::assert_eq;
use std::path::Path;

struct Store {
    dir: tempfile::TempDir,
}

impl Store {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("my")).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `pem` under its thumbprint and return the thumbprint.
    fn add(&self, cert_pem: &str, key_pem: Option<&str>) -> String {
        let der = rustls_pemfile::certs(&mut cert_pem.as_bytes())
            .next()
            .unwrap()
            .unwrap();
        let thumb = thumbprint(&der);

        let content = format!("{cert_pem}{}", key_pem.unwrap_or_default());
        std::fs::write(self.root().join("my").join(format!("{thumb}.pem")), content).unwrap();
        thumb
    }

    fn ctx(&self) -> Context {
        Context::new().with_file_read(TokioFileRead).with_env(static_env(&[(
            "APPSVC_CERT_STORE_ROOT",
            &self.root().to_string_lossy(),
        )]))
    }
}

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[tokio::test]
async fn test_load_certificate_by_thumbprint() {
    init();
    let store = Store::new();
    let cert = rcgen::generate_simple_self_signed(vec!["portal.test".to_string()]).unwrap();
    let thumb = store.add(
        &cert.serialize_pem().unwrap(),
        Some(&cert.serialize_private_key_pem()),
    );

    // Thumbprints are often pasted lower-case with separators.
    let pasted = thumb
        .to_lowercase()
        .as_bytes()
        .chunks(2)
        .map(|c| String::from_utf8_lossy(c).to_string())
        .collect::<Vec<_>>()
        .join(":");

    let loaded = CertificateLoader::new(&pasted)
        .with_store_location(StoreLocation::LocalMachine)
        .load(&store.ctx())
        .await
        .expect("certificate must be found");

    assert_eq!(loaded.info().thumbprint, thumb);
    assert!(loaded.info().has_private_key);
    assert!(loaded.pem().starts_with(b"-----BEGIN CERTIFICATE-----"));
}

#[tokio::test]
async fn test_expired_certificate_is_still_returned() {
    init();
    let store = Store::new();

    let mut params = rcgen::CertificateParams::new(vec!["expired.test".to_string()]);
    params.not_before = rcgen::date_time_ymd(2000, 1, 1);
    params.not_after = rcgen::date_time_ymd(2001, 1, 1);
    let cert = rcgen::Certificate::from_params(params).unwrap();
    let thumb = store.add(
        &cert.serialize_pem().unwrap(),
        Some(&cert.serialize_private_key_pem()),
    );

    let loaded = CertificateLoader::new(&thumb)
        .load(&store.ctx())
        .await
        .expect("expired certificate is only warned about");

    assert!(loaded.info().is_expired(now()));
}

#[tokio::test]
async fn test_certificate_without_private_key_is_still_returned() {
    init();
    let store = Store::new();
    let cert = rcgen::generate_simple_self_signed(vec!["portal.test".to_string()]).unwrap();
    let thumb = store.add(&cert.serialize_pem().unwrap(), None);

    let loaded = CertificateLoader::new(&thumb)
        .load(&store.ctx())
        .await
        .expect("certificate without key is only logged");

    assert!(!loaded.info().has_private_key);
}

#[tokio::test]
async fn test_unknown_thumbprint_degrades_to_none() {
    init();
    let store = Store::new();

    let loaded = CertificateLoader::new("0123456789ABCDEF0123456789ABCDEF01234567")
        .load(&store.ctx())
        .await;
    assert!(loaded.is_none());
}
