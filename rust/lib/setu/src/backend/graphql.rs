//! GraphQL-over-HTTP client.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{DataBackend, Document};
use crate::error::ApiError;

pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// How requests authenticate against the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Static admin secret sent as `x-hasura-admin-secret`.
    AdminSecret(String),
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    None,
}

/// [`DataBackend`] that POSTs documents to a GraphQL endpoint.
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    credential: Credential,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>, credential: Credential) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            credential,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credential {
            Credential::AdminSecret(secret) => builder.header(ADMIN_SECRET_HEADER, secret),
            Credential::Bearer(token) => builder.bearer_auth(token),
            Credential::None => builder,
        }
    }

    async fn execute(&self, document: &Document, variables: Value) -> Result<Value, ApiError> {
        debug!(operation = document.operation, endpoint = %self.endpoint, "graphql request");
        let req = self.http.post(&self.endpoint).json(&body(document, variables));
        let resp = self.authed(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status: code, message });
        }

        let envelope: Value = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))?;
        unwrap_envelope(envelope)
    }
}

#[async_trait::async_trait]
impl DataBackend for GraphqlClient {
    async fn query(&self, document: &Document, variables: Value) -> Result<Value, ApiError> {
        self.execute(document, variables).await
    }

    async fn mutate(&self, document: &Document, variables: Value) -> Result<Value, ApiError> {
        self.execute(document, variables).await
    }
}

fn body(document: &Document, variables: Value) -> Value {
    json!({
        "query": document.source,
        "variables": variables,
        "operationName": document.operation,
    })
}

/// Extract `data`, turning a non-empty `errors` array into an error.
fn unwrap_envelope(raw: Value) -> Result<Value, ApiError> {
    let envelope: Envelope = serde_json::from_value(raw)
        .map_err(|e| ApiError::Decode(format!("graphql envelope: {}", e)))?;
    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(ApiError::Graphql(messages.join("; ")));
    }
    envelope
        .data
        .filter(|d| !d.is_null())
        .ok_or_else(|| ApiError::Decode("response has no data".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::documents;
    use crate::model::Role;

    #[test]
    fn request_body_names_the_operation() {
        let doc = documents::insert(Role::Citizen);
        let b = body(&doc, json!({"object": {"username": "ana"}}));
        assert_eq!(b["operationName"], json!("InsertCitizen"));
        assert_eq!(b["variables"]["object"]["username"], json!("ana"));
        assert_eq!(b["query"], json!(doc.source));
    }

    #[test]
    fn data_is_returned() {
        let data = unwrap_envelope(json!({"data": {"citizens": []}})).unwrap();
        assert_eq!(data, json!({"citizens": []}));
    }

    #[test]
    fn errors_are_joined() {
        let err = unwrap_envelope(json!({
            "errors": [{"message": "field not found"}, {"message": "permission denied"}]
        }))
        .unwrap_err();
        assert_eq!(err, ApiError::Graphql("field not found; permission denied".into()));
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        assert!(matches!(unwrap_envelope(json!({})), Err(ApiError::Decode(_))));
        assert!(matches!(unwrap_envelope(json!({"data": null})), Err(ApiError::Decode(_))));
    }

    #[test]
    fn client_keeps_endpoint() {
        let client = GraphqlClient::new(
            "https://example.hasura.app/v1/graphql",
            Credential::AdminSecret("s3cret".into()),
        );
        assert_eq!(client.endpoint(), "https://example.hasura.app/v1/graphql");
    }
}
