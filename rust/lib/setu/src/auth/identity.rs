use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account issued by the authentication provider.
///
/// `uid` is the identity token every role record links to through its
/// `firebase_uid` column. The application only ever reads identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: String,
    /// Session credential, when the provider issued one.
    #[serde(skip_serializing, default)]
    pub id_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            id_token: None,
            expires_at: None,
        }
    }

    pub fn with_token(mut self, id_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        self.id_token = Some(id_token.into());
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the session credential has expired at `now`. Identities
    /// without a credential never expire.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| now >= at).unwrap_or(false)
    }
}
