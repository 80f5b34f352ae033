//! Two-phase registration: create the identity, then link a profile row.
//!
//! There is no transaction across the provider and the backend. If the
//! second phase fails the identity stays behind without a profile and the
//! error carries it so the caller can report or clean it up.

use tracing::{error, info};

use crate::auth::AuthProvider;
use crate::backend::{insert_profile, DataBackend};
use crate::error::RegistrationError;
use crate::model::{NewProfile, RegistrationForm, Role, RoleRecord};

pub async fn register(
    auth: &dyn AuthProvider,
    backend: &dyn DataBackend,
    role_key: &str,
    form: &RegistrationForm,
) -> Result<RoleRecord, RegistrationError> {
    let role = Role::from_key(role_key)
        .ok_or_else(|| RegistrationError::UnknownRole(role_key.to_string()))?;

    let identity = auth
        .create_account(&form.email, &form.password)
        .await
        .map_err(RegistrationError::IdentityCreationFailed)?;

    let profile = NewProfile::build(role, form, &identity.uid);
    match insert_profile(backend, &profile).await {
        Ok(record) => {
            info!(uid = %identity.uid, role = %role, id = ?record.id(), "registration complete");
            Ok(record)
        }
        Err(source) => {
            error!(
                uid = %identity.uid,
                email = %identity.email,
                role = %role,
                error = %source,
                "profile insert failed, identity left without a profile"
            );
            Err(RegistrationError::ProfileLinkFailed { identity, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, AuthError};
    use crate::memory::{MemoryAuth, MemoryBackend};

    fn form(email: &str) -> RegistrationForm {
        RegistrationForm {
            email: email.into(),
            password: "secret1".into(),
            username: "vee".into(),
            full_name: "Vee".into(),
            skills: "driving".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn unknown_role_calls_nobody() {
        let auth = MemoryAuth::new();
        let backend = MemoryBackend::new();
        let err = register(&auth, &backend, "pilot", &form("a@b.com")).await.unwrap_err();
        assert_eq!(err, RegistrationError::UnknownRole("pilot".into()));
        assert_eq!(auth.account_count(), 0);
        assert_eq!(backend.mutation_count(), 0);
    }

    #[tokio::test]
    async fn creates_linked_row() {
        let auth = MemoryAuth::new();
        let backend = MemoryBackend::new();
        let record = register(&auth, &backend, "volunteer", &form("a@b.com")).await.unwrap();
        assert_eq!(record.role(), Role::Volunteer);
        assert_eq!(Some(record.identity_id().to_string()), auth.uid_of("a@b.com"));
        assert_eq!(record.text("skills"), Some("driving"));
        assert_eq!(record.id(), Some(1));
    }

    #[tokio::test]
    async fn duplicate_email_is_identity_failure() {
        let auth = MemoryAuth::new();
        let backend = MemoryBackend::new();
        register(&auth, &backend, "volunteer", &form("a@b.com")).await.unwrap();
        let err = register(&auth, &backend, "citizen", &form("a@b.com")).await.unwrap_err();
        match err {
            RegistrationError::IdentityCreationFailed(AuthError::Rejected { code, .. }) => {
                assert_eq!(code, "EMAIL_EXISTS")
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(backend.mutation_count(), 1);
    }

    #[tokio::test]
    async fn insert_failure_reports_orphan() {
        let auth = MemoryAuth::new();
        let backend = MemoryBackend::new();
        backend.fail_mutations(Some(ApiError::Network("down".into())));
        let err = register(&auth, &backend, "volunteer", &form("a@b.com")).await.unwrap_err();
        let orphan = err.orphaned_identity().cloned().unwrap();
        assert_eq!(Some(orphan.uid), auth.uid_of("a@b.com"));
        assert_eq!(backend.row_count(), 0);
    }
}
