//! Dashboard state, stored at `dashboard/view`.

use serde::Serialize;

use crate::dashboard::DashboardView;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<DashboardView>,
    /// Whether the profile card is expanded.
    pub show_profile: bool,
}

impl DashboardState {
    pub const PATH: &'static str = "dashboard/view";
}
