//! State types, one per path. UIs render from these.

mod app;
mod auth;
mod dashboard;
mod session;

pub use app::AppRoute;
pub use auth::{LoginState, RegisterState};
pub use dashboard::DashboardState;
pub use session::SessionState;
