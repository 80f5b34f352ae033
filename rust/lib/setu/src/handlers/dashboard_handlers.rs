//! Dashboard handler implementations.

use swasthya_flux::StateStore;

use super::SwasthyaContext;
use crate::dashboard::compose_view;
use crate::state::*;

/// Handle `dashboard/load`.
pub async fn handle_load(store: &StateStore, ctx: &SwasthyaContext) {
    let Some(identity) = ctx.session.current() else {
        store.set(AppRoute::PATH, AppRoute::new(AppRoute::LOGIN));
        return;
    };

    let show_profile = store
        .get_as::<DashboardState>(DashboardState::PATH)
        .map(|d| d.show_profile)
        .unwrap_or(false);
    store.set(DashboardState::PATH, DashboardState {
        loading: true,
        error: None,
        view: None,
        show_profile,
    });

    let state = match compose_view(ctx.backend.as_ref(), &identity.uid).await {
        Ok(view) => DashboardState {
            loading: false,
            error: None,
            view: Some(view),
            show_profile,
        },
        Err(e) => DashboardState {
            loading: false,
            error: Some(e.to_string()),
            view: None,
            show_profile,
        },
    };
    store.set(DashboardState::PATH, state);
}

/// Handle `dashboard/toggle-profile`.
pub async fn handle_toggle_profile(store: &StateStore) {
    store.update(DashboardState::PATH, DashboardState::default, |d: &mut DashboardState| {
        d.show_profile = !d.show_profile;
    });
}
