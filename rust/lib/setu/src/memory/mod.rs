//! In-process collaborators.
//!
//! Used by the integration tests and by `swasthya demo`. They follow the
//! same contracts as the remote implementations, including provider
//! error codes and the shape of GraphQL responses.

mod auth;
mod backend;

pub use auth::MemoryAuth;
pub use backend::MemoryBackend;
