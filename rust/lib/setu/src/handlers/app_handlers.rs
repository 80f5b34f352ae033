//! App lifecycle handlers.

use swasthya_flux::StateStore;
use tracing::info;

use super::{dashboard_handlers, SwasthyaContext};
use crate::state::*;

/// Handle `app/initialize`.
pub async fn handle_initialize(store: &StateStore, ctx: &SwasthyaContext) {
    store.set(LoginState::PATH, LoginState::default());
    store.set(RegisterState::PATH, RegisterState::default());
    store.set(DashboardState::PATH, DashboardState::default());

    ctx.session.publish(ctx.auth.current_identity());
    match ctx.session.current() {
        Some(identity) => {
            info!(uid = %identity.uid, "resuming session");
            store.set(AppRoute::PATH, AppRoute::new(AppRoute::DASHBOARD));
            dashboard_handlers::handle_load(store, ctx).await;
        }
        None => store.set(AppRoute::PATH, AppRoute::new(AppRoute::WELCOME)),
    }
}
