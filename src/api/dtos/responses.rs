use crate::domain::models::{auth::UserProfile, tenant::Tenant, user::Role};
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct TenantResponse {
    pub message: &'static str,
    pub tenant: Tenant,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub role: Role,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    pub message: &'static str,
    pub token: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
