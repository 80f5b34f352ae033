//! `swasthya demo`: the whole journey against in-memory services.

use std::sync::Arc;

use anyhow::Result;
use swasthya_setu::memory::{MemoryAuth, MemoryBackend};
use swasthya_setu::request::*;
use swasthya_setu::state::*;
use swasthya_setu::{RegistrationForm, SwasthyaApp};
use tracing::info;

use super::render;

pub async fn run(json_output: bool) -> Result<()> {
    let app = SwasthyaApp::new(Arc::new(MemoryAuth::new()), Arc::new(MemoryBackend::new()));
    super::initialize(&app).await;

    let form = RegistrationForm {
        email: "ana@example.com".into(),
        password: "demo-password".into(),
        username: "ana".into(),
        full_name: "Ana".into(),
        address: "12 MG Road".into(),
        date_of_birth: "2000-01-01".into(),
        phone_number: "111".into(),
        emergency_contact: "222".into(),
        medical_history: "none".into(),
        ..Default::default()
    };
    app.emit(RegisterReq::PATH, RegisterReq {
        role: "citizen".into(),
        form: form.clone(),
    })
    .await;
    let registered = app.get::<RegisterState>(RegisterState::PATH).unwrap_or_default();
    if let Some(error) = registered.error {
        anyhow::bail!("demo registration failed: {}", error);
    }
    info!(email = %form.email, "demo citizen registered");

    app.emit(LogoutReq::PATH, LogoutReq).await;
    app.emit(LoginReq::PATH, LoginReq {
        email: form.email.clone(),
        password: form.password.clone(),
    })
    .await;
    if let Some(error) = app.get::<LoginState>(LoginState::PATH).and_then(|s| s.error) {
        anyhow::bail!("demo login failed: {}", error);
    }

    match app.get::<DashboardState>(DashboardState::PATH).and_then(|s| s.view) {
        Some(view) => render::view(&view, json_output),
        None => anyhow::bail!("demo dashboard is empty"),
    }
}
