//! Login and registration screen state.

use serde::Serialize;

/// Stored at `auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginState {
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message, e.g. after a password reset was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl LoginState {
    pub const PATH: &'static str = "auth/login";
}

/// Stored at `auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterState {
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub completed: bool,
    /// Set when the account was created but its profile was not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphaned_uid: Option<String>,
}

impl RegisterState {
    pub const PATH: &'static str = "auth/register";
}
