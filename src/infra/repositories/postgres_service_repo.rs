use crate::domain::{models::{service::Service, tenant::SchemaName}, ports::ServiceRepository};
use crate::error::AppError;
use crate::infra::namespace::{Dialect, Namespace};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresServiceRepo {
    pool: PgPool,
}

impl PostgresServiceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for PostgresServiceRepo {
    async fn create(&self, schema: &SchemaName, service: &Service) -> Result<Service, AppError> {
        let sql = Namespace::new(Dialect::Postgres, schema).render(
            "INSERT INTO {services} (id, name, price, created_at) VALUES ($1, $2, $3::NUMERIC, $4) \
             RETURNING id, name, price::TEXT AS price, created_at",
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
        let sql = Namespace::new(Dialect::Postgres, schema).render(
            "SELECT id, name, price::TEXT AS price, created_at FROM {services} WHERE id = $1",
        );
        sqlx::query_as::<_, Service>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, schema: &SchemaName) -> Result<Vec<Service>, AppError> {
        let sql = Namespace::new(Dialect::Postgres, schema).render(
            "SELECT id, name, price::TEXT AS price, created_at FROM {services} ORDER BY created_at DESC",
        );
        sqlx::query_as::<_, Service>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
