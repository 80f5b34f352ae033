//! Auth handler implementations.

use swasthya_flux::StateStore;
use tracing::{info, warn};

use super::SwasthyaContext;
use crate::dashboard::{compose_view, DashboardView};
use crate::error::{LoginError, RegistrationError};
use crate::registration;
use crate::request::*;
use crate::state::*;

pub const NO_PROFILE_MESSAGE: &str =
    "No profile is linked to this account. Please complete registration.";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Please enter your email address.";
pub const RESET_SENT_MESSAGE: &str = "Password reset email sent. Please check your inbox.";
pub const REGISTERED_MESSAGE: &str =
    "Registration successful! You can now log in with your credentials.";

fn login_failed(store: &StateStore, message: String) {
    store.set(LoginState::PATH, LoginState {
        busy: false,
        error: Some(message),
        notice: None,
    });
}

/// Handle `auth/login`.
pub async fn handle_login(req: &LoginReq, store: &StateStore, ctx: &SwasthyaContext) {
    store.set(LoginState::PATH, LoginState {
        busy: true,
        error: None,
        notice: None,
    });

    let identity = match ctx.auth.sign_in(&req.email, &req.password).await {
        Ok(identity) => identity,
        Err(e) => {
            warn!(email = %req.email, code = e.error_code(), "sign-in rejected");
            login_failed(store, LoginError::SignIn(e).to_string());
            return;
        }
    };
    ctx.session.publish(Some(identity.clone()));

    match compose_view(ctx.backend.as_ref(), &identity.uid).await {
        Ok(DashboardView::NoProfile) => {
            info!(uid = %identity.uid, "signed in without a profile");
            login_failed(store, NO_PROFILE_MESSAGE.to_string());
            store.set(AppRoute::PATH, AppRoute::new(AppRoute::REGISTER));
        }
        Ok(view) => {
            info!(uid = %identity.uid, "signed in");
            store.set(LoginState::PATH, LoginState::default());
            store.set(DashboardState::PATH, DashboardState {
                loading: false,
                error: None,
                view: Some(view),
                show_profile: false,
            });
            store.set(AppRoute::PATH, AppRoute::new(AppRoute::DASHBOARD));
        }
        Err(e) => login_failed(store, LoginError::Lookup(e).to_string()),
    }
}

/// Handle `auth/reset-password`.
pub async fn handle_reset_password(req: &ResetPasswordReq, store: &StateStore, ctx: &SwasthyaContext) {
    let email = req.email.trim();
    if email.is_empty() {
        login_failed(store, EMAIL_REQUIRED_MESSAGE.to_string());
        return;
    }

    store.set(LoginState::PATH, LoginState {
        busy: true,
        error: None,
        notice: None,
    });
    match ctx.auth.reset_password(email).await {
        Ok(()) => store.set(LoginState::PATH, LoginState {
            busy: false,
            error: None,
            notice: Some(RESET_SENT_MESSAGE.to_string()),
        }),
        Err(e) => login_failed(store, e.to_string()),
    }
}

/// Handle `auth/register`.
///
/// Session changes the provider reports while the account is being
/// created are held back until the profile row exists (or failed).
pub async fn handle_register(req: &RegisterReq, store: &StateStore, ctx: &SwasthyaContext) {
    store.set(RegisterState::PATH, RegisterState {
        busy: true,
        ..RegisterState::default()
    });

    let _flow = ctx.session.begin_flow();
    let result = registration::register(
        ctx.auth.as_ref(),
        ctx.backend.as_ref(),
        &req.role,
        &req.form,
    )
    .await;

    match result {
        Ok(_) => {
            store.set(RegisterState::PATH, RegisterState {
                completed: true,
                ..RegisterState::default()
            });
            store.set(LoginState::PATH, LoginState {
                busy: false,
                error: None,
                notice: Some(REGISTERED_MESSAGE.to_string()),
            });
            store.set(AppRoute::PATH, AppRoute::new(AppRoute::LOGIN));
        }
        Err(e) => {
            let orphaned_uid = match &e {
                RegistrationError::ProfileLinkFailed { identity, .. } => Some(identity.uid.clone()),
                _ => None,
            };
            store.set(RegisterState::PATH, RegisterState {
                busy: false,
                error: Some(e.to_string()),
                completed: false,
                orphaned_uid,
            });
        }
    }
}

/// Handle `auth/logout`.
pub async fn handle_logout(store: &StateStore, ctx: &SwasthyaContext) {
    if let Err(e) = ctx.auth.sign_out().await {
        warn!(error = %e, "provider sign-out failed");
    }
    ctx.session.publish(None);
    store.set(DashboardState::PATH, DashboardState::default());
    store.set(LoginState::PATH, LoginState::default());
    store.set(AppRoute::PATH, AppRoute::new(AppRoute::LOGIN));
}
