//! Role resolution: which table holds the profile for an identity.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::backend::{documents, DataBackend};
use crate::error::ApiError;
use crate::model::{Role, RoleRecord};

/// A found profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub role: Role,
    /// Role key, or the administrator's own sub-role for `admin_users`.
    pub label: String,
    pub record: RoleRecord,
}

impl Resolution {
    pub fn new(record: RoleRecord) -> Self {
        let role = record.role();
        let label = match role {
            Role::SystemAdministrator => record.admin_role().unwrap_or(role.key()).to_string(),
            _ => role.key().to_string(),
        };
        Self { role, label, record }
    }
}

/// Find the role record linked to `identity_token`.
///
/// One query covers all five tables. Tables are scanned in
/// [`Role::PRIORITY`] order and the first hit wins; `Ok(None)` means no
/// table has a row for this identity yet.
pub async fn resolve_role(
    backend: &dyn DataBackend,
    identity_token: &str,
) -> Result<Option<Resolution>, ApiError> {
    if identity_token.trim().is_empty() {
        return Err(ApiError::Validation("identity token is required".into()));
    }

    let data = backend
        .query(&documents::lookup(), json!({ "firebase_uid": identity_token }))
        .await?;

    let mut found: Option<Resolution> = None;
    for role in Role::PRIORITY {
        // Lower-priority tables never override a hit, so they are not decoded.
        if let Some(winner) = &found {
            if let Some(Value::Array(rows)) = data.get(role.table()) {
                if !rows.is_empty() {
                    warn!(
                        uid = identity_token,
                        chosen = winner.role.table(),
                        ignored = role.table(),
                        "identity is linked in more than one role table"
                    );
                }
            }
            continue;
        }

        let rows = match data.get(role.table()) {
            Some(Value::Array(rows)) => rows,
            Some(_) => {
                return Err(ApiError::Decode(format!("{} is not a list", role.table())));
            }
            None => {
                return Err(ApiError::Decode(format!("response has no {}", role.table())));
            }
        };
        let Some(first) = rows.first() else {
            continue;
        };
        if rows.len() > 1 {
            warn!(table = role.table(), rows = rows.len(), "identity has several rows in one table, using the first");
        }
        found = Some(Resolution::new(RoleRecord::from_value(role, first.clone())?));
    }

    match &found {
        Some(r) => debug!(uid = identity_token, role = %r.role, "role resolved"),
        None => debug!(uid = identity_token, "no profile linked"),
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    #[tokio::test]
    async fn empty_token_never_reaches_backend() {
        let backend = MemoryBackend::new();
        let err = resolve_role(&backend, "  ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(backend.query_count(), 0);
    }

    #[tokio::test]
    async fn admin_label_is_sub_role() {
        let backend = MemoryBackend::new();
        backend.seed(
            Role::SystemAdministrator,
            json!({"firebase_uid": "a", "username": "root", "role": "super_admin"}),
        );
        backend.seed(Role::SystemAdministrator, json!({"firebase_uid": "b", "role": null}));

        let r = resolve_role(&backend, "a").await.unwrap().unwrap();
        assert_eq!(r.role, Role::SystemAdministrator);
        assert_eq!(r.label, "super_admin");

        let r = resolve_role(&backend, "b").await.unwrap().unwrap();
        assert_eq!(r.label, "admin_user");
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let backend = MemoryBackend::new();
        backend.fail_queries(Some(ApiError::Server { status: 401, message: "unauthorized".into() }));
        let err = resolve_role(&backend, "x").await.unwrap_err();
        assert_eq!(err.error_code(), crate::error::error_code::SERVER);
    }

    struct Canned(Value);

    #[async_trait::async_trait]
    impl DataBackend for Canned {
        async fn query(&self, _: &documents::Document, _: Value) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }

        async fn mutate(&self, _: &documents::Document, _: Value) -> Result<Value, ApiError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn malformed_responses_are_decode_errors() {
        let missing = Canned(json!({"hospital_admins": []}));
        assert!(matches!(resolve_role(&missing, "x").await, Err(ApiError::Decode(_))));

        let mut tables = serde_json::Map::new();
        for role in Role::PRIORITY {
            tables.insert(role.table().into(), json!([]));
        }
        tables.insert("citizens".into(), json!(["not a row"]));
        let bad_row = Canned(Value::Object(tables));
        assert!(matches!(resolve_role(&bad_row, "x").await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn tables_after_a_hit_are_not_decoded() {
        let backend = Canned(json!({
            "hospital_admins": [{"id": 1, "firebase_uid": "u", "username": "h"}],
            "medical_shop_admins": [],
            "citizens": null,
            "volunteers": [],
        }));
        let r = resolve_role(&backend, "u").await.unwrap().unwrap();
        assert_eq!(r.role, Role::HospitalAdmin);
        assert_eq!(r.record.get("username"), Some(&json!("h")));
    }
}
