//! Register / login / dashboard / reset-password commands.

use anyhow::Result;
use clap::Args;
use swasthya_setu::request::*;
use swasthya_setu::state::*;
use swasthya_setu::{RegistrationForm, SwasthyaApp};

use super::render;

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// hospital_admin, medical_shop_admin, citizen, volunteer or admin_user.
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub email: String,
    /// Password (not recommended, use the interactive prompt).
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub phone_number: String,
    /// YYYY-MM-DD.
    #[arg(long, default_value = "")]
    pub date_of_birth: String,
    #[arg(long, default_value = "")]
    pub emergency_contact: String,
    #[arg(long, default_value = "")]
    pub medical_history: String,
    #[arg(long, default_value = "")]
    pub vaccination_record: String,
    #[arg(long, default_value = "")]
    pub skills: String,
    #[arg(long, default_value = "")]
    pub availability: String,
    /// Administrator sub-role (admin_user only).
    #[arg(long, default_value = "")]
    pub admin_role: String,
}

impl RegisterArgs {
    fn form(&self, password: String) -> RegistrationForm {
        RegistrationForm {
            email: self.email.clone(),
            password,
            username: self.username.clone(),
            full_name: self.full_name.clone(),
            address: self.address.clone(),
            date_of_birth: self.date_of_birth.clone(),
            phone_number: self.phone_number.clone(),
            emergency_contact: self.emergency_contact.clone(),
            medical_history: self.medical_history.clone(),
            vaccination_record: self.vaccination_record.clone(),
            skills: self.skills.clone(),
            availability: self.availability.clone(),
            admin_role: self.admin_role.clone(),
        }
    }
}

pub async fn register(app: &SwasthyaApp, args: &RegisterArgs, password: String) -> Result<()> {
    super::initialize(app).await;
    app.emit(RegisterReq::PATH, RegisterReq {
        role: args.role.clone(),
        form: args.form(password),
    })
    .await;

    let state = app
        .get::<RegisterState>(RegisterState::PATH)
        .unwrap_or_default();
    if let Some(error) = state.error {
        if let Some(uid) = state.orphaned_uid {
            eprintln!("Account {} exists without a profile.", uid);
        }
        anyhow::bail!("Registration failed: {}", error);
    }

    let notice = app.get::<LoginState>(LoginState::PATH).and_then(|s| s.notice);
    println!("{}", notice.unwrap_or_else(|| "Registration successful!".into()));
    Ok(())
}

pub async fn login(app: &SwasthyaApp, email: &str, password: &str) -> Result<()> {
    super::initialize(app).await;
    app.emit(LoginReq::PATH, LoginReq {
        email: email.to_string(),
        password: password.to_string(),
    })
    .await;

    let state = app.get::<LoginState>(LoginState::PATH).unwrap_or_default();
    let route = app.get::<AppRoute>(AppRoute::PATH).map(|r| r.0).unwrap_or_default();
    if let Some(error) = state.error {
        if route == AppRoute::REGISTER {
            println!("{}", error);
            println!("Run `swasthya register --role <role> --email {}` to create a profile.", email);
            return Ok(());
        }
        anyhow::bail!("Login failed: {}", error);
    }

    if let Some(identity) = app.session().current() {
        println!("Signed in as {} ({}).", identity.email, identity.uid);
    }
    Ok(())
}

/// Print the dashboard composed by the last login.
pub fn dashboard(app: &SwasthyaApp, json_output: bool) -> Result<()> {
    let state = app
        .get::<DashboardState>(DashboardState::PATH)
        .unwrap_or_default();
    if let Some(error) = state.error {
        anyhow::bail!("Dashboard failed: {}", error);
    }
    match state.view {
        Some(view) => render::view(&view, json_output),
        None => Ok(()),
    }
}

pub async fn reset_password(app: &SwasthyaApp, email: &str) -> Result<()> {
    super::initialize(app).await;
    app.emit(ResetPasswordReq::PATH, ResetPasswordReq {
        email: email.to_string(),
    })
    .await;

    let state = app.get::<LoginState>(LoginState::PATH).unwrap_or_default();
    if let Some(error) = state.error {
        anyhow::bail!("{}", error);
    }
    if let Some(notice) = state.notice {
        println!("{}", notice);
    }
    Ok(())
}
