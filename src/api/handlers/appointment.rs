use axum::{extract::State, response::IntoResponse, Json};
use crate::api::dtos::{
    requests::{present, BookAppointmentRequest},
    responses::MessageResponse,
};
use crate::api::extractors::tenant::TenantContext;
use crate::domain::models::appointment::{parse_appointment_time, Appointment};
use crate::api::extractors::json::AppJson;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn book_appointment(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
    AppJson(payload): AppJson<BookAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(service_id), Some(raw_time)) = (present(payload.service_id), present(payload.appointment_time)) else {
        return Err(AppError::Validation("All fields required".into()));
    };

    let appointment_time = parse_appointment_time(&raw_time)
        .ok_or_else(|| AppError::Validation("Invalid appointment time".into()))?;

    let schema = &ctx.tenant.schema_name;
    if state.service_repo.find_by_id(schema, &service_id).await?.is_none() {
        return Err(AppError::Validation("Unknown service".into()));
    }

    let appointment = Appointment::new(ctx.claims.user_id.clone(), service_id, appointment_time);
    let created = state.appointment_repo.create(schema, &appointment).await?;
    info!("Appointment {} booked in {}", created.id, schema);

    Ok(Json(MessageResponse { message: "Appointment booked successfully" }))
}

pub async fn my_appointments(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let appointments = state
        .appointment_repo
        .list_for_user(&ctx.tenant.schema_name, &ctx.claims.user_id)
        .await?;
    Ok(Json(appointments))
}

pub async fn all_appointments(
    State(state): State<Arc<AppState>>,
    ctx: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let appointments = state.appointment_repo.list_for_tenant(&ctx.tenant.schema_name).await?;
    Ok(Json(appointments))
}
