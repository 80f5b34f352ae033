use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::auth::{rejection, AuthProvider, Identity, ObserverId, SessionBroadcast, SessionObserver};
use crate::error::AuthError;

struct Account {
    uid: String,
    password: String,
}

/// Email/password provider backed by a map.
///
/// Accounts are keyed by lowercased email. Uids are `mem-uid-<n>`.
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, Account>>,
    session: SessionBroadcast,
    next_uid: AtomicU64,
    min_password_len: usize,
    resets: Mutex<Vec<String>>,
    failure: Mutex<Option<AuthError>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            session: SessionBroadcast::new(),
            next_uid: AtomicU64::new(1),
            min_password_len: 0,
            resets: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Reject passwords shorter than `len` with `WEAK_PASSWORD`.
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Fail every subsequent call with `err` until cleared with `None`.
    pub fn fail_with(&self, err: Option<AuthError>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = err;
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Uid of the account registered under `email`, if any.
    pub fn uid_of(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalize(email))
            .map(|a| a.uid.clone())
    }

    /// Emails a password reset was sent to, oldest first.
    pub fn resets(&self) -> Vec<String> {
        self.resets.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn injected(&self) -> Result<(), AuthError> {
        match self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuthProvider for MemoryAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.injected()?;
        let key = normalize(email);
        if !key.contains('@') {
            return Err(rejection("INVALID_EMAIL"));
        }
        if password.len() < self.min_password_len {
            return Err(rejection("WEAK_PASSWORD"));
        }

        let identity = {
            let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
            if accounts.contains_key(&key) {
                return Err(rejection("EMAIL_EXISTS"));
            }
            let uid = format!("mem-uid-{}", self.next_uid.fetch_add(1, Ordering::Relaxed));
            accounts.insert(
                key.clone(),
                Account {
                    uid: uid.clone(),
                    password: password.to_string(),
                },
            );
            Identity::new(uid, key)
        };

        debug!(uid = %identity.uid, "memory account created");
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.injected()?;
        let key = normalize(email);
        let identity = {
            let accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
            match accounts.get(&key) {
                None => return Err(rejection("EMAIL_NOT_FOUND")),
                Some(account) if account.password != password => {
                    return Err(rejection("INVALID_PASSWORD"))
                }
                Some(account) => Identity::new(account.uid.clone(), key),
            }
        };
        self.session.set(Some(identity.clone()));
        Ok(identity)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.injected()?;
        let key = normalize(email);
        if !self
            .accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key)
        {
            return Err(rejection("EMAIL_NOT_FOUND"));
        }
        self.resets.lock().unwrap_or_else(PoisonError::into_inner).push(key);
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

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}
