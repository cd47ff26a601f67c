pub mod auth_service;
pub mod tenant_service;
