//! GraphQL documents for the role tables.
//!
//! Selections are generated from the column descriptors, so a document
//! always fetches exactly the columns the dashboard knows how to show.

use crate::model::Role;

pub const LOOKUP_OPERATION: &str = "GetUserByFirebaseUid";

/// A GraphQL document and the operation name it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub operation: &'static str,
    pub source: String,
}

/// Space-separated column selection for `role`'s table.
pub fn selection(role: Role) -> String {
    role.fields()
        .iter()
        .map(|f| f.column)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One query that looks a firebase uid up in every role table at once.
///
/// Variables: `{ "firebase_uid": String }`. The response has one array
/// per table name.
pub fn lookup() -> Document {
    let mut source = format!("query {}($firebase_uid: String!) {{\n", LOOKUP_OPERATION);
    for role in Role::PRIORITY {
        source.push_str(&format!(
            "  {}(where: {{firebase_uid: {{_eq: $firebase_uid}}}}) {{ {} }}\n",
            role.table(),
            selection(role)
        ));
    }
    source.push('}');
    Document {
        operation: LOOKUP_OPERATION,
        source,
    }
}

/// Insert-one mutation for `role`'s table.
///
/// Variables: `{ "object": <table>_insert_input }`. The response field is
/// `insert_<table>_one`.
pub fn insert(role: Role) -> Document {
    let source = format!(
        "mutation {}($object: {}_insert_input!) {{\n  {}(object: $object) {{ {} }}\n}}",
        role.insert_operation(),
        role.table(),
        role.insert_field(),
        selection(role)
    );
    Document {
        operation: role.insert_operation(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_fans_out_in_priority_order() {
        let doc = lookup();
        assert_eq!(doc.operation, "GetUserByFirebaseUid");
        assert!(doc.source.starts_with("query GetUserByFirebaseUid($firebase_uid: String!) {"));

        let positions: Vec<usize> = Role::PRIORITY
            .iter()
            .map(|r| doc.source.find(&format!("  {}(where:", r.table())).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn lookup_selects_descriptor_columns() {
        let doc = lookup();
        assert!(doc.source.contains(
            "citizens(where: {firebase_uid: {_eq: $firebase_uid}}) { id firebase_uid username email full_name date_of_birth address phone_number emergency_contact medical_history vaccination_record }"
        ));
        assert!(doc.source.contains("admin_users(where: {firebase_uid: {_eq: $firebase_uid}}) { id firebase_uid username email full_name role address }"));
    }

    #[test]
    fn insert_document_per_role() {
        let doc = insert(Role::Volunteer);
        assert_eq!(doc.operation, "InsertVolunteer");
        assert!(doc.source.starts_with("mutation InsertVolunteer($object: volunteers_insert_input!) {"));
        assert!(doc.source.contains("insert_volunteers_one(object: $object) { id firebase_uid"));

        let doc = insert(Role::SystemAdministrator);
        assert_eq!(doc.operation, "InsertAdminUser");
        assert!(doc.source.contains("insert_admin_users_one(object: $object)"));
    }
}
