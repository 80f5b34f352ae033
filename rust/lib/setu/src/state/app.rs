//! App-level state, stored at `app/route`.

use serde::Serialize;

/// Navigation route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppRoute(pub String);

impl AppRoute {
    pub const PATH: &'static str = "app/route";

    pub const WELCOME: &'static str = "/welcome";
    pub const LOGIN: &'static str = "/login";
    pub const REGISTER: &'static str = "/register";
    pub const DASHBOARD: &'static str = "/dashboard";

    pub fn new(route: &str) -> Self {
        Self(route.to_string())
    }
}
