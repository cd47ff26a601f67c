use crate::domain::models::tenant::{SchemaName, Tenant};
use crate::domain::models::user::Role;
use crate::domain::ports::{SchemaProvisioner, TenantRepository};
use crate::error::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

/// Tenant lifecycle: registration, resolution of the per-request tenant and
/// reconciliation of namespaces left behind without a registry row.
pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
    provisioner: Arc<dyn SchemaProvisioner>,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantRepository>, provisioner: Arc<dyn SchemaProvisioner>) -> Self {
        Self { tenants, provisioner }
    }

    pub async fn create_tenant(&self, requester: Role, name: &str, schema: SchemaName) -> Result<Tenant, AppError> {
        if requester != Role::SuperAdmin {
            return Err(AppError::Forbidden("Only superadmin can create tenants".into()));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name and schema_name required".into()));
        }

        if self.tenants.find_by_schema_name(&schema).await?.is_some() {
            return Err(AppError::Conflict("Schema name already exists".into()));
        }

        match self.tenants.create_with_namespace(&Tenant::new(name.to_string(), schema)).await {
            Ok(tenant) => Ok(tenant),
            // Lost a race with a concurrent registration of the same name.
            Err(e) if e.is_unique_violation() => Err(AppError::Conflict("Schema name already exists".into())),
            Err(AppError::Database(e)) => {
                warn!("Tenant registration failed: {}", e);
                Err(AppError::Provision(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves the `x-tenant-id` header value to an active tenant.
    pub async fn resolve(&self, header: Option<&str>) -> Result<Tenant, AppError> {
        let raw = header
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::Validation("Tenant header missing".into()))?;

        let schema = SchemaName::parse(raw).map_err(|_| AppError::Validation("Invalid tenant id".into()))?;
        self.resolve_schema(&schema).await
    }

    pub async fn resolve_schema(&self, schema: &SchemaName) -> Result<Tenant, AppError> {
        match self.tenants.find_by_schema_name(schema).await? {
            Some(tenant) if tenant.is_active => Ok(tenant),
            _ => Err(AppError::InvalidTenant),
        }
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, AppError> {
        self.tenants.list().await
    }

    pub async fn toggle_active(&self, requester: Role, id: &str) -> Result<Tenant, AppError> {
        if requester != Role::SuperAdmin {
            return Err(AppError::Forbidden("Only superadmin can update tenants".into()));
        }

        let tenant = self
            .tenants
            .toggle_active(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tenant not found".into()))?;

        info!(
            "Tenant {} ({}) is now {}",
            tenant.id,
            tenant.schema_name,
            if tenant.is_active { "active" } else { "inactive" }
        );
        Ok(tenant)
    }

    /// Namespaces present in storage with no matching registry row.
    pub async fn find_orphaned_namespaces(&self) -> Result<Vec<SchemaName>, AppError> {
        let registered: HashSet<String> = self
            .tenants
            .list()
            .await?
            .into_iter()
            .map(|t| t.schema_name.as_str().to_ascii_lowercase())
            .collect();

        let mut orphans: Vec<SchemaName> = self
            .provisioner
            .list_namespaces()
            .await?
            .into_iter()
            .filter(|ns| !registered.contains(&ns.as_str().to_ascii_lowercase()))
            .collect();
        orphans.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(orphans)
    }

    /// Tears down every orphaned namespace. Returns the ones removed.
    pub async fn cleanup_orphaned_namespaces(&self) -> Result<Vec<SchemaName>, AppError> {
        let orphans = self.find_orphaned_namespaces().await?;
        for schema in &orphans {
            self.provisioner.teardown(schema).await?;
            info!("Dropped orphaned namespace {}", schema);
        }
        Ok(orphans)
    }
}
