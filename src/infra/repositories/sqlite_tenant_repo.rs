use crate::domain::{models::tenant::{SchemaName, Tenant}, ports::TenantRepository};
use crate::error::AppError;
use crate::infra::provisioning::sqlite::provision_in;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

pub struct SqliteTenantRepo {
    pool: SqlitePool,
}

impl SqliteTenantRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantRepository for SqliteTenantRepo {
    async fn create_with_namespace(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        let mut tx = self.pool.begin().await?;

        // Registry row first: a duplicate fails here, before any DDL runs.
        let created = sqlx::query_as::<_, Tenant>(
            "INSERT INTO tenants (id, name, schema_name, is_active, created_at) VALUES (?, ?, ?, ?, ?) \
             RETURNING id, name, schema_name, is_active, created_at"
        )
            .bind(&tenant.id)
            .bind(&tenant.name)
            .bind(tenant.schema_name.as_str())
            .bind(tenant.is_active)
            .bind(tenant.created_at)
            .fetch_one(&mut *tx)
            .await?;

        provision_in(&mut tx, &created.schema_name).await?;
        tx.commit().await?;

        info!("Registered and provisioned tenant {} ({})", created.id, created.schema_name);
        Ok(created)
    }

    async fn find_by_schema_name(&self, schema: &SchemaName) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, schema_name, is_active, created_at FROM tenants WHERE schema_name = ?",
        )
            .bind(schema.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "SELECT id, name, schema_name, is_active, created_at FROM tenants ORDER BY created_at DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn toggle_active(&self, id: &str) -> Result<Option<Tenant>, AppError> {
        sqlx::query_as::<_, Tenant>(
            "UPDATE tenants SET is_active = NOT is_active WHERE id = ? \
             RETURNING id, name, schema_name, is_active, created_at"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
