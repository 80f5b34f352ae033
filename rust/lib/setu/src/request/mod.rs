//! Request types, one per path. UIs emit these.

mod app;
mod auth;
mod dashboard;

pub use app::InitializeReq;
pub use auth::{LoginReq, LogoutReq, RegisterReq, ResetPasswordReq};
pub use dashboard::{LoadDashboardReq, ToggleProfileReq};
