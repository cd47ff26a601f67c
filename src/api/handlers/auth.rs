use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::{
    requests::{present, LoginRequest, SignupRequest},
    responses::{AdminLoginResponse, LoginResponse, SignupResponse},
};
use crate::api::extractors::tenant::TenantHeader;
use crate::domain::models::{auth::UserProfile, user::{Role, User}};
use crate::api::extractors::json::AppJson;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    TenantHeader(tenant): TenantHeader,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(email), Some(password), Some(role)) = (
        present(payload.name),
        present(payload.email),
        payload.password.filter(|p| !p.is_empty()),
        present(payload.role),
    ) else {
        return Err(AppError::Validation("All fields required".into()));
    };

    let role = role
        .parse::<Role>()
        .ok()
        .filter(Role::is_tenant_role)
        .ok_or_else(|| AppError::Validation("Role must be customer or barber".into()))?;

    let hash = state.auth_service.hash_password(&password)?;
    let user = User::new(name, email, hash, role);

    let created = state
        .user_repo
        .create(&tenant.schema_name, &user)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                AppError::Conflict("Email already registered".into())
            } else {
                e
            }
        })?;

    info!("User {} signed up in {}", created.id, tenant.schema_name);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "Signup successful",
            user: UserProfile {
                id: created.id,
                name: created.name,
                email: created.email,
                role: created.role,
            },
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    TenantHeader(tenant): TenantHeader,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(email), Some(password)) = (present(payload.email), payload.password) else {
        return Err(AppError::InvalidCredentials);
    };

    let user = state
        .user_repo
        .find_by_email(&tenant.schema_name, &email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state.auth_service.verify_password(&password, &user.password)? {
        warn!("Failed login for {} in {}", user.id, tenant.schema_name);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.auth_service.issue_token(&user.id, user.role, Some(&tenant.schema_name))?;
    info!("User logged in: {}", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        role: user.role,
    }))
}

pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(email), Some(password)) = (present(payload.email), payload.password) else {
        return Err(AppError::InvalidCredentials);
    };

    let admin = state
        .admin_repo
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state.auth_service.verify_password(&password, &admin.password)? {
        warn!("Failed admin login for {}", admin.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.auth_service.issue_token(&admin.id, Role::SuperAdmin, None)?;
    info!("Admin logged in: {}", admin.id);

    Ok(Json(AdminLoginResponse {
        message: "Admin login successful",
        token,
    }))
}
