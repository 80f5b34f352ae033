//! Error taxonomy for the client flows.
//!
//! Every variant carries a stable, machine-readable code (see
//! [`error_code`]). UIs match on codes; messages may be reworded.

use thiserror::Error;

use crate::auth::Identity;

/// Stable error code constants.
pub mod error_code {
    pub const AUTH_REJECTED: &str = "AUTH_REJECTED";
    pub const NETWORK: &str = "NETWORK";
    pub const DECODE: &str = "DECODE";
    pub const UNSUPPORTED: &str = "UNSUPPORTED";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const SERVER: &str = "SERVER";
    pub const GRAPHQL: &str = "GRAPHQL";
    pub const UNKNOWN_ROLE: &str = "UNKNOWN_ROLE";
    pub const IDENTITY_CREATION_FAILED: &str = "IDENTITY_CREATION_FAILED";
    pub const PROFILE_LINK_FAILED: &str = "PROFILE_LINK_FAILED";
    pub const SIGN_IN_FAILED: &str = "SIGN_IN_FAILED";
    pub const PROFILE_LOOKUP_FAILED: &str = "PROFILE_LOOKUP_FAILED";
}

// ── AuthError ───────────────────────────────────────────────────────

/// Failure reported by the authentication provider.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// The provider refused the request (duplicate account, weak
    /// password, bad credentials). `code` is the provider's own code.
    #[error("{message}")]
    Rejected { code: String, message: String },

    #[error("network: {0}")]
    Network(String),

    #[error("decode: {0}")]
    Decode(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl AuthError {
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        AuthError::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Rejected { .. } => error_code::AUTH_REJECTED,
            AuthError::Network(_) => error_code::NETWORK,
            AuthError::Decode(_) => error_code::DECODE,
            AuthError::Unsupported(_) => error_code::UNSUPPORTED,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Network(e.to_string())
    }
}

// ── ApiError ────────────────────────────────────────────────────────

/// Failure reported by the data backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request rejected before reaching the backend.
    #[error("{0}")]
    Validation(String),

    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(String),

    /// The endpoint answered with a non-empty `errors` array.
    #[error("{0}")]
    Graphql(String),

    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => error_code::VALIDATION_FAILED,
            ApiError::Server { .. } => error_code::SERVER,
            ApiError::Network(_) => error_code::NETWORK,
            ApiError::Graphql(_) => error_code::GRAPHQL,
            ApiError::Decode(_) => error_code::DECODE,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

// ── RegistrationError ───────────────────────────────────────────────

/// Outcome of a failed registration saga.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    /// The role key does not name one of the five role tables. Raised
    /// before any collaborator is called.
    #[error("Invalid role selected: {0:?}")]
    UnknownRole(String),

    /// Phase 1 failed; nothing was written anywhere.
    #[error("{0}")]
    IdentityCreationFailed(AuthError),

    /// Phase 2 failed after the identity was created. The identity is
    /// left without a profile (orphaned) and is not rolled back.
    #[error("account {} was created but its profile could not be saved: {source}", .identity.uid)]
    ProfileLinkFailed { identity: Identity, source: ApiError },
}

impl RegistrationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistrationError::UnknownRole(_) => error_code::UNKNOWN_ROLE,
            RegistrationError::IdentityCreationFailed(_) => error_code::IDENTITY_CREATION_FAILED,
            RegistrationError::ProfileLinkFailed { .. } => error_code::PROFILE_LINK_FAILED,
        }
    }

    /// The identity left behind by a partial failure, if any.
    pub fn orphaned_identity(&self) -> Option<&Identity> {
        match self {
            RegistrationError::ProfileLinkFailed { identity, .. } => Some(identity),
            _ => None,
        }
    }
}

// ── LoginError ──────────────────────────────────────────────────────

/// Failure of the sign-in flow. A missing profile is not an error; it
/// surfaces as `DashboardView::NoProfile`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoginError {
    #[error("{0}")]
    SignIn(AuthError),

    #[error("{0}")]
    Lookup(ApiError),
}

impl LoginError {
    pub fn error_code(&self) -> &'static str {
        match self {
            LoginError::SignIn(_) => error_code::SIGN_IN_FAILED,
            LoginError::Lookup(_) => error_code::PROFILE_LOOKUP_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new("uid-7", "ana@example.com")
    }

    #[test]
    fn auth_error_display_is_message() {
        let e = AuthError::rejected("EMAIL_EXISTS", "The email address is already in use.");
        assert_eq!(e.to_string(), "The email address is already in use.");
        assert_eq!(e.error_code(), "AUTH_REJECTED");
    }

    #[test]
    fn api_error_codes() {
        assert_eq!(ApiError::Validation("x".into()).error_code(), "VALIDATION_FAILED");
        assert_eq!(
            ApiError::Server { status: 500, message: "x".into() }.error_code(),
            "SERVER"
        );
        assert_eq!(ApiError::Network("x".into()).error_code(), "NETWORK");
        assert_eq!(ApiError::Graphql("x".into()).error_code(), "GRAPHQL");
        assert_eq!(ApiError::Decode("x".into()).error_code(), "DECODE");
    }

    #[test]
    fn registration_error_codes() {
        assert_eq!(
            RegistrationError::UnknownRole("pilot".into()).error_code(),
            "UNKNOWN_ROLE"
        );
        assert_eq!(
            RegistrationError::IdentityCreationFailed(AuthError::Network("down".into()))
                .error_code(),
            "IDENTITY_CREATION_FAILED"
        );
        let e = RegistrationError::ProfileLinkFailed {
            identity: identity(),
            source: ApiError::Graphql("constraint violation".into()),
        };
        assert_eq!(e.error_code(), "PROFILE_LINK_FAILED");
    }

    #[test]
    fn profile_link_failure_names_orphan() {
        let e = RegistrationError::ProfileLinkFailed {
            identity: identity(),
            source: ApiError::Network("timeout".into()),
        };
        assert_eq!(e.orphaned_identity().map(|i| i.uid.as_str()), Some("uid-7"));
        assert!(e.to_string().contains("uid-7"));
        assert!(e.to_string().contains("timeout"));

        let e = RegistrationError::UnknownRole("pilot".into());
        assert!(e.orphaned_identity().is_none());
    }

    #[test]
    fn identity_creation_failure_is_verbatim() {
        let e = RegistrationError::IdentityCreationFailed(AuthError::rejected(
            "WEAK_PASSWORD",
            "Password should be at least 6 characters.",
        ));
        assert_eq!(e.to_string(), "Password should be at least 6 characters.");
    }
}
