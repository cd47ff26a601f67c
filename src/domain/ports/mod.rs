use crate::domain::models::{
    tenant::{SchemaName, Tenant}, user::{Admin, User}, service::Service,
    appointment::{Appointment, AppointmentView},
};
use crate::error::AppError;
use async_trait::async_trait;

/// The shared tenant registry.
#[async_trait]
pub trait TenantRepository: Send + Sync {
    /// Inserts the registry row and materializes the namespace in one transaction.
    async fn create_with_namespace(&self, tenant: &Tenant) -> Result<Tenant, AppError>;
    async fn find_by_schema_name(&self, schema: &SchemaName) -> Result<Option<Tenant>, AppError>;
    async fn list(&self) -> Result<Vec<Tenant>, AppError>;
    async fn toggle_active(&self, id: &str) -> Result<Option<Tenant>, AppError>;
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: &Admin) -> Result<Admin, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError>;
}

#[async_trait]
pub trait SchemaProvisioner: Send + Sync {
    /// Create-if-not-exists for the namespace and its relations.
    async fn provision(&self, schema: &SchemaName) -> Result<(), AppError>;
    async fn teardown(&self, schema: &SchemaName) -> Result<(), AppError>;
    /// Every namespace materialized in storage, registered or not.
    async fn list_namespaces(&self) -> Result<Vec<SchemaName>, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, schema: &SchemaName, user: &User) -> Result<User, AppError>;
    async fn find_by_email(&self, schema: &SchemaName, email: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, schema: &SchemaName, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, schema: &SchemaName, id: &str) -> Result<Option<Service>, AppError>;
    async fn list(&self, schema: &SchemaName) -> Result<Vec<Service>, AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, schema: &SchemaName, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn list_for_user(&self, schema: &SchemaName, user_id: &str) -> Result<Vec<AppointmentView>, AppError>;
    async fn list_for_tenant(&self, schema: &SchemaName) -> Result<Vec<AppointmentView>, AppError>;
}
