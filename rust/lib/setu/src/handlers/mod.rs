//! Request handlers and their Flux wiring.
//!
//! Each handler is a plain async function over the state store and the
//! [`SwasthyaContext`]. `register_handlers` binds them to request paths,
//! downcasting the payload to the request type.

pub mod app_handlers;
pub mod auth_handlers;
pub mod dashboard_handlers;

use std::sync::Arc;

use swasthya_flux::{Flux, StateStore};
use tracing::warn;

use crate::auth::AuthProvider;
use crate::backend::DataBackend;
use crate::request::*;
use crate::session::IdentitySession;

/// Collaborators every handler may use.
pub struct SwasthyaContext {
    pub auth: Arc<dyn AuthProvider>,
    pub backend: Arc<dyn DataBackend>,
    pub session: Arc<IdentitySession>,
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<SwasthyaContext>) {
    // app/initialize
    {
        let ctx = ctx.clone();
        flux.on(InitializeReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                app_handlers::handle_initialize(&store, &ctx).await;
            }
        });
    }

    // auth/login
    {
        let ctx = ctx.clone();
        flux.on(LoginReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<LoginReq>() else {
                    warn!(%path, "payload is not a LoginReq");
                    return;
                };
                auth_handlers::handle_login(req, &store, &ctx).await;
            }
        });
    }

    // auth/reset-password
    {
        let ctx = ctx.clone();
        flux.on(ResetPasswordReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<ResetPasswordReq>() else {
                    warn!(%path, "payload is not a ResetPasswordReq");
                    return;
                };
                auth_handlers::handle_reset_password(req, &store, &ctx).await;
            }
        });
    }

    // auth/register
    {
        let ctx = ctx.clone();
        flux.on(RegisterReq::PATH, move |path, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<RegisterReq>() else {
                    warn!(%path, "payload is not a RegisterReq");
                    return;
                };
                auth_handlers::handle_register(req, &store, &ctx).await;
            }
        });
    }

    // auth/logout
    {
        let ctx = ctx.clone();
        flux.on(LogoutReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                auth_handlers::handle_logout(&store, &ctx).await;
            }
        });
    }

    // dashboard/load
    {
        let ctx = ctx.clone();
        flux.on(LoadDashboardReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                dashboard_handlers::handle_load(&store, &ctx).await;
            }
        });
    }

    // dashboard/toggle-profile
    flux.on(ToggleProfileReq::PATH, |_, _, store: Arc<StateStore>| async move {
        dashboard_handlers::handle_toggle_profile(&store).await;
    });
}
