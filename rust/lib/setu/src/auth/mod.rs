//! Authentication provider boundary.
//!
//! The application never issues or stores credentials itself. It only
//! asks a provider to create accounts, sign in, send password resets,
//! and tell it who is signed in.

mod broadcast;
mod firebase;
mod identity;

pub use broadcast::{ObserverId, SessionBroadcast, SessionObserver};
pub use firebase::FirebaseAuth;
pub(crate) use firebase::rejection;
pub use identity::Identity;

use crate::error::AuthError;

/// Pluggable authentication provider.
///
/// Implementations keep their own session: a successful `create_account`
/// or `sign_in` makes that identity current and notifies observers.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync + 'static {
    /// Create a new account. The new identity becomes current.
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Ask the provider to send a password reset email.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn current_identity(&self) -> Option<Identity>;

    /// Observe session changes. The observer is called once immediately
    /// with the current identity, then on every change.
    fn observe_session(&self, observer: SessionObserver) -> ObserverId;

    fn unobserve_session(&self, id: ObserverId);
}
