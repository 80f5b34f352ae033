//! Identity Toolkit REST client.
//!
//! Talks to `https://identitytoolkit.googleapis.com/v1/accounts:*` with the
//! project's web API key, the same endpoints the platform SDKs wrap.

use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::{AuthProvider, Identity, ObserverId, SessionBroadcast, SessionObserver};
use crate::error::AuthError;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Email/password authentication against the Identity Toolkit API.
pub struct FirebaseAuth {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: SessionBroadcast,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    id_token: String,
    /// Lifetime of `id_token` in seconds, sent as a decimal string.
    expires_in: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseAuth {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Point the client at another Identity Toolkit host (e.g. the local
    /// auth emulator).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            session: SessionBroadcast::new(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, method, self.api_key)
    }

    async fn post(&self, method: &str, body: serde_json::Value) -> Result<reqwest::Response, AuthError> {
        let resp = self.http.post(self.url(method)).json(&body).send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => Err(rejection(&envelope.error.message)),
            Err(_) => Err(AuthError::Decode(format!("HTTP {}: {}", status, text))),
        }
    }

    async fn account(&self, method: &str, email: &str, password: &str) -> Result<Identity, AuthError> {
        let resp = self
            .post(
                method,
                serde_json::json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let account: AccountResponse = resp
            .json()
            .await
            .map_err(|e| AuthError::Decode(format!("{} response: {}", method, e)))?;

        let lifetime: i64 = account
            .expires_in
            .parse()
            .map_err(|_| AuthError::Decode(format!("bad expiresIn {:?}", account.expires_in)))?;
        let identity = Identity::new(account.local_id, account.email)
            .with_token(account.id_token, Utc::now() + Duration::seconds(lifetime));

        self.session.set(Some(identity.clone()));
        Ok(identity)
    }
}

#[async_trait::async_trait]
impl AuthProvider for FirebaseAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self.account("signUp", email, password).await?;
        info!(uid = %identity.uid, "account created");
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        match self.account("signInWithPassword", email, password).await {
            Ok(identity) => Ok(identity),
            Err(e) => {
                warn!(error = %e, "sign-in rejected");
                Err(e)
            }
        }
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.post(
            "sendOobCode",
            serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": email,
            }),
        )
        .await?;
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.session.set(None);
        Ok(())
    }

    fn current_identity(&self) -> Option<Identity> {
        self.session.current()
    }

    fn observe_session(&self, observer: SessionObserver) -> ObserverId {
        self.session.observe(observer)
    }

    fn unobserve_session(&self, id: ObserverId) {
        self.session.unobserve(id);
    }
}

/// Map a provider error message such as `"WEAK_PASSWORD : Password should
/// be at least 6 characters"` to a rejection with a readable message.
pub(crate) fn rejection(raw: &str) -> AuthError {
    let (code, detail) = match raw.split_once(" : ") {
        Some((code, detail)) => (code.trim(), Some(detail.trim())),
        None => (raw.trim(), None),
    };
    let message = match code {
        "EMAIL_EXISTS" => "The email address is already in use by another account.".to_string(),
        "WEAK_PASSWORD" => "Password should be at least 6 characters.".to_string(),
        "INVALID_EMAIL" => "The email address is badly formatted.".to_string(),
        "EMAIL_NOT_FOUND" => "There is no account for this email address.".to_string(),
        "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "The email or password is incorrect.".to_string()
        }
        "USER_DISABLED" => "This account has been disabled.".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => {
            "Too many attempts. Please try again later.".to_string()
        }
        other => detail.map(str::to_string).unwrap_or_else(|| other.to_string()),
    };
    AuthError::rejected(code, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_method_and_key() {
        let auth = FirebaseAuth::with_base_url("http://localhost:9099/identitytoolkit.googleapis.com/v1/", "k1");
        assert_eq!(
            auth.url("signUp"),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/accounts:signUp?key=k1"
        );
    }

    #[test]
    fn known_codes_get_readable_messages() {
        match rejection("EMAIL_EXISTS") {
            AuthError::Rejected { code, message } => {
                assert_eq!(code, "EMAIL_EXISTS");
                assert!(message.contains("already in use"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn detail_after_separator_is_stripped_from_code() {
        match rejection("WEAK_PASSWORD : Password should be at least 6 characters") {
            AuthError::Rejected { code, .. } => assert_eq!(code, "WEAK_PASSWORD"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_code_keeps_provider_detail() {
        match rejection("OPERATION_NOT_ALLOWED : Password sign-in is disabled") {
            AuthError::Rejected { code, message } => {
                assert_eq!(code, "OPERATION_NOT_ALLOWED");
                assert_eq!(message, "Password sign-in is disabled");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn sign_out_clears_current_identity() {
        let auth = FirebaseAuth::new("k1");
        auth.session.set(Some(Identity::new("uid-1", "a@b.com")));
        assert!(auth.current_identity().is_some());

        auth.sign_out().await.unwrap();
        assert!(auth.current_identity().is_none());
    }
}
