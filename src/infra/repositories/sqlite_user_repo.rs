use crate::domain::{models::{tenant::SchemaName, user::User}, ports::UserRepository};
use crate::error::AppError;
use crate::infra::namespace::{Dialect, Namespace};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, schema: &SchemaName, user: &User) -> Result<User, AppError> {
        let sql = Namespace::new(Dialect::Sqlite, schema).render(
            "INSERT INTO {users} (id, name, email, password, role, created_at) VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id, name, email, password, role, created_at",
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .bind(user.role.as_str())
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, schema: &SchemaName, email: &str) -> Result<Option<User>, AppError> {
        let sql = Namespace::new(Dialect::Sqlite, schema).render(
            "SELECT id, name, email, password, role, created_at FROM {users} WHERE email = ?",
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
