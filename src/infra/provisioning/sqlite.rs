use crate::domain::{models::tenant::SchemaName, ports::SchemaProvisioner};
use crate::error::AppError;
use crate::infra::namespace::{sqlite_namespace_of, Dialect, Namespace, Relation};
use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

// Index names are global on SQLite, so per-namespace indexes are left out.
const NAMESPACE_DDL: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS {users} (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('customer', 'barber')),
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {services} (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        price TEXT NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {appointments} (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES {users}(id),
        service_id TEXT NOT NULL REFERENCES {services}(id),
        appointment_time TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'completed', 'cancelled')),
        created_at TEXT NOT NULL
    )"#,
];

const NAMESPACE_TEARDOWN: &[&str] = &[
    "DROP TABLE IF EXISTS {appointments}",
    "DROP TABLE IF EXISTS {services}",
    "DROP TABLE IF EXISTS {users}",
];

pub async fn provision_in(conn: &mut SqliteConnection, schema: &SchemaName) -> Result<(), AppError> {
    let ns = Namespace::new(Dialect::Sqlite, schema);
    for template in NAMESPACE_DDL {
        let sql = ns.render(template);
        sqlx::query(&sql)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::Provision(format!("{}: {}", schema, e)))?;
    }
    Ok(())
}

pub struct SqliteProvisioner {
    pool: SqlitePool,
}

impl SqliteProvisioner {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaProvisioner for SqliteProvisioner {
    async fn provision(&self, schema: &SchemaName) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        provision_in(&mut tx, schema).await?;
        tx.commit().await?;
        info!("Provisioned namespace {}", schema);
        Ok(())
    }

    async fn teardown(&self, schema: &SchemaName) -> Result<(), AppError> {
        let ns = Namespace::new(Dialect::Sqlite, schema);
        let mut tx = self.pool.begin().await?;
        for template in NAMESPACE_TEARDOWN {
            let sql = ns.render(template);
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Dropped namespace {}", schema);
        Ok(())
    }

    async fn list_namespaces(&self) -> Result<Vec<SchemaName>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE ? ESCAPE '\\' ORDER BY name",
        )
            .bind("%\\_\\_appointments")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(table,)| sqlite_namespace_of(&table, Relation::Appointments))
            .collect())
    }
}
