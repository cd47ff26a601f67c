//! Route → role policy for token-authenticated endpoints.
//!
//! Every route that takes an [`AuthUser`](crate::api::extractors::auth::AuthUser)
//! must have a row here. Lookups for anything else are denied.

use crate::domain::models::user::Role;
use crate::error::AppError;
use axum::http::Method;

const SUPERADMIN: &[Role] = &[Role::SuperAdmin];
const TENANT_MEMBERS: &[Role] = &[Role::Barber, Role::Customer];
const BARBER: &[Role] = &[Role::Barber];

pub const ROUTE_POLICY: &[(&str, &str, &[Role])] = &[
    ("POST", "/api/tenants", SUPERADMIN),
    ("PATCH", "/api/tenants/{id}", SUPERADMIN),
    ("GET", "/api/services", TENANT_MEMBERS),
    ("POST", "/api/services/create", BARBER),
    ("POST", "/api/appointments/book", TENANT_MEMBERS),
    ("GET", "/api/appointments/my", TENANT_MEMBERS),
    ("GET", "/api/appointments/all", BARBER),
];

pub fn allowed_roles(method: &Method, route: &str) -> Option<&'static [Role]> {
    ROUTE_POLICY
        .iter()
        .find(|(m, r, _)| method.as_str() == *m && *r == route)
        .map(|(_, _, roles)| *roles)
}

pub fn require_role(role: Role, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".into()))
    }
}

pub fn authorize(method: &Method, route: Option<&str>, role: Role) -> Result<(), AppError> {
    let allowed = route
        .and_then(|route| allowed_roles(method, route))
        .ok_or_else(|| AppError::Forbidden("Access denied".into()))?;
    require_role(role, allowed)
}
