use axum::{
    extract::{FromRef, FromRequestParts, MatchedPath},
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::api::policy;
use crate::domain::models::auth::SessionClaims;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// Verified bearer token whose role is allowed on the matched route.
pub struct AuthUser(pub SessionClaims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_token(token)?;

        Span::current().record("user_id", claims.user_id.as_str());
        if let Some(tenant) = &claims.tenant {
            Span::current().record("tenant_id", tenant.as_str());
        }

        let route = parts.extensions.get::<MatchedPath>().map(|p| p.as_str());
        policy::authorize(&parts.method, route, claims.role)?;

        Ok(AuthUser(claims))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("No token provided".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid token".into()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No token provided".into()))
}
