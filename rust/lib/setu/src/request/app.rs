//! App lifecycle requests.

/// Seed flow state and pick the first route.
#[derive(Debug, Clone)]
pub struct InitializeReq;

impl InitializeReq {
    pub const PATH: &'static str = "app/initialize";
}
