//! Data backend boundary.
//!
//! Profiles live in five role tables behind a GraphQL endpoint. The
//! core only needs two capabilities from it: run a query, run a
//! mutation. Both take a [`Document`] and a JSON variables object and
//! return the response's `data` object.

pub mod documents;
mod graphql;

pub use documents::Document;
pub use graphql::{Credential, GraphqlClient};

use serde_json::{json, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::model::{NewProfile, RoleRecord};

#[async_trait::async_trait]
pub trait DataBackend: Send + Sync + 'static {
    async fn query(&self, document: &Document, variables: Value) -> Result<Value, ApiError>;

    async fn mutate(&self, document: &Document, variables: Value) -> Result<Value, ApiError>;
}

/// Insert a new profile into its role table.
///
/// The profile's variant picks the insert operation; the created row
/// comes back as a [`RoleRecord`].
pub async fn insert_profile(
    backend: &dyn DataBackend,
    profile: &NewProfile,
) -> Result<RoleRecord, ApiError> {
    let role = profile.role();
    let document = documents::insert(role);
    let variables = json!({ "object": profile.to_object()? });

    debug!(operation = document.operation, table = role.table(), "inserting profile");
    let data = backend.mutate(&document, variables).await?;

    let field = role.insert_field();
    let row = data
        .get(&field)
        .cloned()
        .ok_or_else(|| ApiError::Decode(format!("response has no {}", field)))?;
    if row.is_null() {
        return Err(ApiError::Decode(format!("{} returned null", field)));
    }
    RoleRecord::from_value(role, row)
}
