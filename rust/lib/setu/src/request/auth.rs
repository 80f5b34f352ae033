//! Auth requests.

use crate::model::RegistrationForm;

/// Sign in with email + password.
#[derive(Debug, Clone)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

impl LoginReq {
    pub const PATH: &'static str = "auth/login";
}

#[derive(Debug, Clone)]
pub struct ResetPasswordReq {
    pub email: String,
}

impl ResetPasswordReq {
    pub const PATH: &'static str = "auth/reset-password";
}

/// Create an account and its profile. `role` is a role key.
#[derive(Debug, Clone)]
pub struct RegisterReq {
    pub role: String,
    pub form: RegistrationForm,
}

impl RegisterReq {
    pub const PATH: &'static str = "auth/register";
}

/// Sign out and clear the dashboard.
#[derive(Debug, Clone)]
pub struct LogoutReq;

impl LogoutReq {
    pub const PATH: &'static str = "auth/logout";
}
