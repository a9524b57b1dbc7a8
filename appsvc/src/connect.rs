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

use appsvc_app_service::{
    AppServiceApi, ArmAppService, ArmClient, AuthType, Config, CredentialStrategy, Mode,
    OfflineAppService,
};
use appsvc_azure_identity::{
    BearerTokenAuthorizer, CertificateLoader, DefaultCredentialProvider, StoreLocation,
};
use appsvc_command_execute_tokio::TokioCommandExecute;
use appsvc_core::{Authorizer, Context, OsEnv, Result};
use appsvc_file_read_tokio::TokioFileRead;
use appsvc_http_send_reqwest::ReqwestHttpSend;
use log::{error, info, warn};

/// Context with the tokio file reader, a reqwest transport, the process
/// environment and the tokio command runner.
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
        .with_command_execute(TokioCommandExecute)
}

/// Build the App Service backend selected by `config`.
///
/// `Mode::Offline` serves seeded in-memory data and never touches `ctx`.
/// Otherwise the credential strategy is chosen here, once, see
/// [`credential_strategy`].
pub async fn connect(config: Config, ctx: Context) -> Result<Box<dyn AppServiceApi>> {
    if config.mode == Mode::Offline {
        info!("offline mode, serving demo data");
        let mut svc = OfflineAppService::seeded();
        if let Some(id) = &config.managed_identity_resource_id {
            svc = svc.with_managed_identity_resource_id(id.clone());
        }
        return Ok(Box::new(svc));
    }

    let (ctx, strategy) = credential_strategy(&config, ctx).await?;
    info!(
        "connected to {} with {} authentication",
        config.base_url, config.auth_type
    );
    Ok(Box::new(ArmAppService::new(ArmClient::new(
        ctx, config, strategy,
    ))))
}

/// Read [`Config`] from the environment of [`default_context`] and connect.
pub async fn connect_from_env() -> Result<Box<dyn AppServiceApi>> {
    let ctx = default_context();
    let config = Config::default().from_env(&ctx)?;
    connect(config, ctx).await
}

/// Pick the credential strategy for `config.auth_type`.
///
/// Certificate based types load the certificate from its store and return a
/// context whose transport presents it. When no thumbprint is configured,
/// the certificate is not found, or it cannot be used as a TLS identity,
/// the failure is logged and the plain transport is kept: the control plane
/// then rejects the handshake.
pub async fn credential_strategy(
    config: &Config,
    ctx: Context,
) -> Result<(Context, CredentialStrategy)> {
    match config.auth_type {
        AuthType::Arm => {
            let authorizer = Authorizer::new(
                ctx.clone(),
                DefaultCredentialProvider::with_scope(&config.scope),
                BearerTokenAuthorizer::new(),
            );
            Ok((ctx, CredentialStrategy::Bearer(authorizer)))
        }
        AuthType::None => Ok((ctx, CredentialStrategy::Anonymous)),
        AuthType::Private | AuthType::Certificate => {
            let thumbprint = config
                .certificate
                .thumbprint
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty());
            let Some(thumbprint) = thumbprint else {
                warn!(
                    "{} authentication without a certificate thumbprint, no client certificate will be sent",
                    config.auth_type
                );
                return Ok((ctx, CredentialStrategy::ClientCertificate(None)));
            };

            let location: StoreLocation = config.certificate.store_location.parse()?;
            let loader = CertificateLoader::new(thumbprint)
                .with_store_name(config.certificate.store_name.clone())
                .with_store_location(location);

            let Some(cert) = loader.load(&ctx).await else {
                return Ok((ctx, CredentialStrategy::ClientCertificate(None)));
            };

            match ReqwestHttpSend::with_client_identity(cert.pem()) {
                Ok(http) => Ok((
                    ctx.with_http_send(http),
                    CredentialStrategy::ClientCertificate(Some(cert.info().clone())),
                )),
                Err(err) => {
                    error!(
                        "certificate {} cannot be presented during the TLS handshake: {err}",
                        cert.info().thumbprint
                    );
                    Ok((ctx, CredentialStrategy::ClientCertificate(None)))
                }
            }
        }
    }
}
