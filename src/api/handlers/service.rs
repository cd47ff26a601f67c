use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::{
    requests::{present, CreateServiceRequest},
    responses::MessageResponse,
};
use crate::api::extractors::tenant::TenantContext;
use crate::domain::models::service::Service;
use crate::api::extractors::json::AppJson;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_repo.list(&ctx.tenant.schema_name).await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    AppJson(payload): AppJson<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(price)) = (present(payload.name), payload.price) else {
        return Err(AppError::Validation("All fields required".into()));
    };
    let price = price.into_price().map_err(|e| AppError::Validation(e.to_string()))?;

    let service = state
        .service_repo
        .create(&ctx.tenant.schema_name, &Service::new(name, price))
        .await?;
    info!("Service {} created in {}", service.id, ctx.tenant.schema_name);

    Ok(Json(MessageResponse { message: "Service created successfully" }))
}
