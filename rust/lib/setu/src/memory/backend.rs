use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::{json, Value};
use tracing::debug;

use crate::backend::documents::LOOKUP_OPERATION;
use crate::backend::{DataBackend, Document};
use crate::error::ApiError;
use crate::model::{Role, Row};

#[derive(Default)]
struct Tables {
    rows: HashMap<Role, Vec<Row>>,
    next_id: HashMap<Role, i64>,
}

impl Tables {
    fn insert(&mut self, role: Role, mut row: Row) -> Row {
        let next = self.next_id.entry(role).or_insert(1);
        match row.get("id").and_then(Value::as_i64) {
            Some(id) => *next = (*next).max(id + 1),
            None => {
                row.insert("id".into(), json!(*next));
                *next += 1;
            }
        }
        self.rows.entry(role).or_default().push(row.clone());
        row
    }
}

/// GraphQL backend simulated over five in-memory tables.
///
/// Documents are interpreted by operation name only: the lookup query and
/// the five insert mutations. Ids are sequential per table, starting at 1.
pub struct MemoryBackend {
    tables: Mutex<Tables>,
    queries: AtomicU64,
    mutations: AtomicU64,
    query_failure: Mutex<Option<ApiError>>,
    mutation_failure: Mutex<Option<ApiError>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            queries: AtomicU64::new(0),
            mutations: AtomicU64::new(0),
            query_failure: Mutex::new(None),
            mutation_failure: Mutex::new(None),
        }
    }

    /// Put a row straight into a table. Rows without an `id` get the next
    /// one. Returns the stored row.
    pub fn seed(&self, role: Role, row: Value) -> Row {
        let row = match row {
            Value::Object(map) => map,
            _ => Row::new(),
        };
        self.tables.lock().unwrap_or_else(PoisonError::into_inner).insert(role, row)
    }

    /// Total rows across every table.
    pub fn row_count(&self) -> usize {
        self.tables
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rows
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    /// Number of mutations attempted, including failed ones.
    pub fn mutation_count(&self) -> u64 {
        self.mutations.load(Ordering::Relaxed)
    }

    /// Fail every subsequent query with `err` until cleared with `None`.
    pub fn fail_queries(&self, err: Option<ApiError>) {
        *self.query_failure.lock().unwrap_or_else(PoisonError::into_inner) = err;
    }

    /// Fail every subsequent mutation with `err` until cleared with `None`.
    pub fn fail_mutations(&self, err: Option<ApiError>) {
        *self.mutation_failure.lock().unwrap_or_else(PoisonError::into_inner) = err;
    }

    fn lookup(&self, variables: &Value) -> Result<Value, ApiError> {
        let uid = variables
            .get("firebase_uid")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Validation("firebase_uid variable is required".into()))?;

        let tables = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        let mut data = Row::new();
        for role in Role::PRIORITY {
            let matches: Vec<Value> = tables
                .rows
                .get(&role)
                .into_iter()
                .flatten()
                .filter(|row| row.get("firebase_uid").and_then(Value::as_str) == Some(uid))
                .map(|row| Value::Object(select(role, row)))
                .collect();
            data.insert(role.table().to_string(), Value::Array(matches));
        }
        Ok(Value::Object(data))
    }

    fn insert(&self, role: Role, variables: &Value) -> Result<Value, ApiError> {
        let object = match variables.get("object") {
            Some(Value::Object(object)) => object.clone(),
            _ => return Err(ApiError::Validation("object variable is required".into())),
        };
        if let Some(column) = object.keys().find(|k| !role.fields().iter().any(|f| f.column == k.as_str())) {
            return Err(ApiError::Graphql(format!(
                "field '{}' not found in type: '{}_insert_input'",
                column,
                role.table()
            )));
        }

        // Unset nullable columns come back as null, like a real table.
        let mut row = object;
        for field in role.fields() {
            row.entry(field.column).or_insert(Value::Null);
        }
        row.remove("id");

        let stored = self.tables.lock().unwrap_or_else(PoisonError::into_inner).insert(role, row);
        debug!(table = role.table(), id = ?stored.get("id"), "memory row inserted");

        let mut data = Row::new();
        data.insert(role.insert_field(), Value::Object(select(role, &stored)));
        Ok(Value::Object(data))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl DataBackend for MemoryBackend {
    async fn query(&self, document: &Document, variables: Value) -> Result<Value, ApiError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.query_failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(err);
        }
        match document.operation {
            LOOKUP_OPERATION => self.lookup(&variables),
            other => Err(ApiError::Graphql(format!("unknown query {}", other))),
        }
    }

    async fn mutate(&self, document: &Document, variables: Value) -> Result<Value, ApiError> {
        self.mutations.fetch_add(1, Ordering::Relaxed);
        if let Some(err) = self.mutation_failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(err);
        }
        match Role::from_insert_operation(document.operation) {
            Some(role) => self.insert(role, &variables),
            None => Err(ApiError::Graphql(format!("unknown mutation {}", document.operation))),
        }
    }
}

/// The selected columns of `row` that it actually has.
fn select(role: Role, row: &Row) -> Row {
    role.fields()
        .iter()
        .filter_map(|f| row.get(f.column).map(|v| (f.column.to_string(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::documents;

    #[tokio::test]
    async fn lookup_returns_every_table() {
        let backend = MemoryBackend::new();
        backend.seed(Role::Volunteer, json!({"firebase_uid": "u1", "username": "vee"}));
        backend.seed(Role::Citizen, json!({"firebase_uid": "u2", "username": "cee"}));

        let data = backend
            .query(&documents::lookup(), json!({"firebase_uid": "u1"}))
            .await
            .unwrap();
        assert_eq!(data["volunteers"], json!([{"id": 1, "firebase_uid": "u1", "username": "vee"}]));
        assert_eq!(data["citizens"], json!([]));
        assert_eq!(data["hospital_admins"], json!([]));
        assert_eq!(backend.query_count(), 1);
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let backend = MemoryBackend::new();
        let doc = documents::insert(Role::Citizen);
        for expected in 1..=3 {
            let data = backend
                .mutate(&doc, json!({"object": {"firebase_uid": format!("u{expected}"), "username": "c"}}))
                .await
                .unwrap();
            assert_eq!(data["insert_citizens_one"]["id"], json!(expected));
        }
        let data = backend
            .mutate(&documents::insert(Role::Volunteer), json!({"object": {"firebase_uid": "v"}}))
            .await
            .unwrap();
        assert_eq!(data["insert_volunteers_one"]["id"], json!(1));
        assert_eq!(backend.mutation_count(), 4);
        assert_eq!(backend.row_count(), 4);
    }

    #[tokio::test]
    async fn insert_returns_nulls_for_unset_columns() {
        let backend = MemoryBackend::new();
        let data = backend
            .mutate(
                &documents::insert(Role::HospitalAdmin),
                json!({"object": {"firebase_uid": "h", "username": "doc"}}),
            )
            .await
            .unwrap();
        let row = &data["insert_hospital_admins_one"];
        assert_eq!(row["hospital_id"], Value::Null);
        assert_eq!(row["username"], json!("doc"));
    }

    #[tokio::test]
    async fn unknown_columns_are_rejected() {
        let backend = MemoryBackend::new();
        let err = backend
            .mutate(
                &documents::insert(Role::Citizen),
                json!({"object": {"firebase_uid": "c", "skills": "x"}}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Graphql(_)));
        assert_eq!(backend.row_count(), 0);
    }

    #[tokio::test]
    async fn injected_mutation_failure() {
        let backend = MemoryBackend::new();
        backend.fail_mutations(Some(ApiError::Network("down".into())));
        let err = backend
            .mutate(&documents::insert(Role::Citizen), json!({"object": {"firebase_uid": "c"}}))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Network("down".into()));
        assert_eq!(backend.mutation_count(), 1);
        assert_eq!(backend.row_count(), 0);
    }

    #[tokio::test]
    async fn counters_track_every_call() {
        let backend = MemoryBackend::new();
        backend.query(&documents::lookup(), json!({"firebase_uid": "a"})).await.unwrap();
        backend.query(&documents::lookup(), json!({"firebase_uid": "b"})).await.unwrap();
        backend
            .mutate(&documents::insert(Role::Volunteer), json!({"object": {"firebase_uid": "v"}}))
            .await
            .unwrap();
        assert_eq!(backend.query_count(), 2);
        assert_eq!(backend.mutation_count(), 1);
    }

    #[tokio::test]
    async fn seeded_ids_advance_the_sequence() {
        let backend = MemoryBackend::new();
        backend.seed(Role::Citizen, json!({"id": 7, "firebase_uid": "a"}));
        let row = backend.seed(Role::Citizen, json!({"firebase_uid": "b"}));
        assert_eq!(row["id"], json!(8));
    }
}
