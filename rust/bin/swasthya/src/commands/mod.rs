pub mod account;
pub mod config;
pub mod demo;
pub mod render;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use swasthya_setu::request::InitializeReq;
use swasthya_setu::{ClientConfig, Credential, FirebaseAuth, GraphqlClient, SwasthyaApp};

/// Build an app against the configured remote services.
pub fn connect(config_path: &Path) -> Result<SwasthyaApp> {
    let config = ClientConfig::load_with_env(config_path)?;
    let remote = config.require_remote()?;

    let auth = Arc::new(FirebaseAuth::new(remote.firebase_api_key));
    let backend = Arc::new(GraphqlClient::new(
        remote.graphql_endpoint,
        Credential::AdminSecret(remote.admin_secret),
    ));
    Ok(SwasthyaApp::new(auth, backend))
}

/// Seed flow state the way a UI does on start.
pub async fn initialize(app: &SwasthyaApp) {
    app.emit(InitializeReq::PATH, InitializeReq).await;
}
