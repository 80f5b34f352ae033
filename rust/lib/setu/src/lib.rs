//! Swasthya Setu client core.
//!
//! Accounts live with an external auth provider; profiles live in five
//! role tables behind a GraphQL backend. This crate links the two:
//!
//! - [`session`]: the signed-in identity as an observable context value
//! - [`resolver`]: which role table holds an identity's profile
//! - [`registration`]: create the identity, then its profile row
//! - [`dashboard`]: the profile card and role panel for a resolved profile
//!
//! The flows are exposed to UIs as Flux requests and state (see
//! [`request`], [`state`], [`handlers`]); [`SwasthyaApp`] wires them up.

pub mod app;
pub mod auth;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod model;
pub mod registration;
pub mod request;
pub mod resolver;
pub mod session;
pub mod state;

pub use app::SwasthyaApp;
pub use auth::{AuthProvider, FirebaseAuth, Identity};
pub use backend::{Credential, DataBackend, GraphqlClient};
pub use config::{ClientConfig, ConfigError};
pub use dashboard::{compose_view, project_fields, select_panel, DashboardView, FieldRow, Panel, ProfileView};
pub use error::{ApiError, AuthError, LoginError, RegistrationError};
pub use model::{RegistrationForm, Role, RoleRecord};
pub use registration::register;
pub use resolver::{resolve_role, Resolution};
pub use session::{FlowGuard, IdentitySession};
