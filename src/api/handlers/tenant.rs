use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::api::dtos::{
    requests::{present, CreateTenantRequest},
    responses::TenantResponse,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::tenant::SchemaName;
use crate::api::extractors::json::AppJson;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn create_tenant(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    AppJson(payload): AppJson<CreateTenantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(schema_name)) = (present(payload.name), present(payload.schema_name)) else {
        return Err(AppError::Validation("Name and schema_name required".into()));
    };

    let schema = SchemaName::parse(&schema_name).map_err(|e| AppError::Validation(e.to_string()))?;

    let tenant = state.tenant_service.create_tenant(claims.role, &name, schema).await?;
    info!("Tenant created: {} by {}", tenant.schema_name, claims.user_id);

    Ok((
        StatusCode::CREATED,
        Json(TenantResponse { message: "Tenant created successfully", tenant }),
    ))
}

pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = state.tenant_service.list_tenants().await?;
    Ok(Json(tenants))
}

pub async fn toggle_tenant_status(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = state.tenant_service.toggle_active(claims.role, &id).await?;
    Ok(Json(TenantResponse { message: "Tenant status updated", tenant }))
}
