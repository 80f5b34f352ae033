use serde::Serialize;
use serde_json::{Map, Value};

use super::Role;
use crate::error::ApiError;

/// A row as the backend returned it: column name → JSON value.
pub type Row = Map<String, Value>;

/// A profile row read from one of the role tables.
///
/// The row is kept as returned so that only the columns the backend sent
/// are ever displayed, and a `null` stays distinguishable from a column
/// that was not fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleRecord {
    role: Role,
    row: Row,
}

impl RoleRecord {
    /// Wrap a backend row. The row must carry its `firebase_uid` link.
    pub fn from_row(role: Role, row: Row) -> Result<Self, ApiError> {
        match row.get("firebase_uid") {
            Some(Value::String(_)) => Ok(Self { role, row }),
            _ => Err(ApiError::Decode(format!(
                "{} row without firebase_uid",
                role.table()
            ))),
        }
    }

    /// Wrap a JSON value that must be an object row.
    pub fn from_value(role: Role, value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(row) => Self::from_row(role, row),
            other => Err(ApiError::Decode(format!(
                "{} row is not an object: {}",
                role.table(),
                other
            ))),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.row.get(column)
    }

    /// A text column, `None` when absent, null or not a string.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.row.get(column).and_then(Value::as_str)
    }

    /// Backend-assigned numeric id.
    pub fn id(&self) -> Option<i64> {
        self.row.get("id").and_then(Value::as_i64)
    }

    /// The identity token this record links to.
    pub fn identity_id(&self) -> &str {
        self.text("firebase_uid").unwrap_or_default()
    }

    pub fn full_name(&self) -> Option<&str> {
        self.text("full_name")
    }

    /// Administrator sub-role, only present on `admin_users` rows.
    pub fn admin_role(&self) -> Option<&str> {
        match self.role {
            Role::SystemAdministrator => self.text("role").filter(|r| !r.is_empty()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn accessors_read_columns() {
        let r = RoleRecord::from_row(
            Role::Citizen,
            row(json!({"id": 3, "firebase_uid": "uid-3", "username": "ana", "full_name": "Ana", "medical_history": null})),
        )
        .unwrap();

        assert_eq!(r.role(), Role::Citizen);
        assert_eq!(r.id(), Some(3));
        assert_eq!(r.identity_id(), "uid-3");
        assert_eq!(r.text("username"), Some("ana"));
        assert_eq!(r.full_name(), Some("Ana"));
        assert_eq!(r.text("medical_history"), None);
        assert_eq!(r.get("medical_history"), Some(&Value::Null));
        assert_eq!(r.get("address"), None);
    }

    #[test]
    fn row_without_link_is_rejected() {
        let err = RoleRecord::from_row(Role::Volunteer, row(json!({"id": 1}))).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = RoleRecord::from_value(Role::Citizen, json!([1, 2])).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn admin_role_only_for_admin_users() {
        let admin = RoleRecord::from_row(
            Role::SystemAdministrator,
            row(json!({"id": 1, "firebase_uid": "u", "role": "super_admin"})),
        )
        .unwrap();
        assert_eq!(admin.admin_role(), Some("super_admin"));

        let citizen = RoleRecord::from_row(
            Role::Citizen,
            row(json!({"id": 1, "firebase_uid": "u", "role": "super_admin"})),
        )
        .unwrap();
        assert_eq!(citizen.admin_role(), None);
    }
}
