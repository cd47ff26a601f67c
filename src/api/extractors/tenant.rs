use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{auth::SessionClaims, tenant::Tenant};
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

pub const TENANT_HEADER: &str = "x-tenant-id";

fn tenant_header(parts: &Parts) -> Result<Option<&str>, AppError> {
    parts
        .headers
        .get(TENANT_HEADER)
        .map(|value| value.to_str().map_err(|_| AppError::Validation("Invalid tenant id".into())))
        .transpose()
}

/// Active tenant named by the `x-tenant-id` header, for the unauthenticated
/// signup and login routes.
pub struct TenantHeader(pub Tenant);

impl FromRequestParts<Arc<AppState>> for TenantHeader {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let tenant = state.tenant_service.resolve(tenant_header(parts)?).await?;
        Span::current().record("tenant_id", tenant.schema_name.as_str());
        Ok(TenantHeader(tenant))
    }
}

/// Authenticated member of the tenant named in the token.
///
/// The tenant is looked up again on every request, so deactivating it locks
/// out tokens that are still cryptographically valid.
pub struct TenantContext {
    pub claims: SessionClaims,
    pub tenant: Tenant,
}

impl FromRequestParts<Arc<AppState>> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        let schema = claims
            .tenant
            .clone()
            .ok_or_else(|| AppError::Forbidden("Tenant context required".into()))?;

        if let Some(requested) = tenant_header(parts)? {
            if requested.trim() != schema.as_str() {
                return Err(AppError::Forbidden("Tenant mismatch".into()));
            }
        }

        let tenant = state.tenant_service.resolve_schema(&schema).await?;
        Ok(TenantContext { claims, tenant })
    }
}
