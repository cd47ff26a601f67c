use crate::domain::{models::{service::Service, tenant::SchemaName}, ports::ServiceRepository};
use crate::error::AppError;
use crate::infra::namespace::{Dialect, Namespace};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn create(&self, schema: &SchemaName, service: &Service) -> Result<Service, AppError> {
        let sql = Namespace::new(Dialect::Sqlite, schema).render(
            "INSERT INTO {services} (id, name, price, created_at) VALUES (?, ?, ?, ?) \
             RETURNING id, name, price, created_at",
        );
        sqlx::query_as::<_, Service>(&sql)
            .bind(&service.id)
            .bind(&service.name)
            .bind(service.price.to_string())
            .bind(service.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, schema: &SchemaName, id: &str) -> Result<Option<Service>, AppError> {
        let sql = Namespace::new(Dialect::Sqlite, schema).render(
            "SELECT id, name, price, created_at FROM {services} WHERE id = ?",
        );
        sqlx::query_as::<_, Service>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, schema: &SchemaName) -> Result<Vec<Service>, AppError> {
        let sql = Namespace::new(Dialect::Sqlite, schema).render(
            "SELECT id, name, price, created_at FROM {services} ORDER BY created_at DESC",
        );
        sqlx::query_as::<_, Service>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
