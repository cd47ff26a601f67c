use std::sync::Arc;
use crate::domain::ports::{
    AdminRepository, AppointmentRepository, SchemaProvisioner, ServiceRepository,
    UserRepository,
};
use crate::domain::services::{auth_service::AuthService, tenant_service::TenantService};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub admin_repo: Arc<dyn AdminRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub provisioner: Arc<dyn SchemaProvisioner>,
    pub tenant_service: Arc<TenantService>,
    pub auth_service: Arc<AuthService>,
}
