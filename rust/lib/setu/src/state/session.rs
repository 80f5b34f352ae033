//! Session state, stored at `session/identity`.

use serde::Serialize;

use crate::auth::Identity;

/// The signed-in identity, or none.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl SessionState {
    pub const PATH: &'static str = "session/identity";
}
