//! Dashboard requests.

/// Compose the dashboard for the signed-in identity.
#[derive(Debug, Clone)]
pub struct LoadDashboardReq;

impl LoadDashboardReq {
    pub const PATH: &'static str = "dashboard/load";
}

/// Expand or collapse the profile card.
#[derive(Debug, Clone)]
pub struct ToggleProfileReq;

impl ToggleProfileReq {
    pub const PATH: &'static str = "dashboard/toggle-profile";
}
