use crate::domain::{models::tenant::SchemaName, ports::SchemaProvisioner};
use crate::error::AppError;
use crate::infra::namespace::{Dialect, Namespace};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};

const NAMESPACE_DDL: &[&str] = &[
    "CREATE SCHEMA IF NOT EXISTS {schema}",
    r#"CREATE TABLE IF NOT EXISTS {users} (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('customer', 'barber')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {services} (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        price NUMERIC NOT NULL CHECK (price >= 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    r#"CREATE TABLE IF NOT EXISTS {appointments} (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL REFERENCES {users}(id),
        service_id TEXT NOT NULL REFERENCES {services}(id),
        appointment_time TIMESTAMPTZ NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending' CHECK (status IN ('pending', 'completed', 'cancelled')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )"#,
    "CREATE INDEX IF NOT EXISTS appointments_user_id_idx ON {appointments} (user_id)",
    "CREATE INDEX IF NOT EXISTS appointments_time_idx ON {appointments} (appointment_time)",
];

pub async fn provision_in(conn: &mut PgConnection, schema: &SchemaName) -> Result<(), AppError> {
    let ns = Namespace::new(Dialect::Postgres, schema);
    for template in NAMESPACE_DDL {
        let sql = ns.render(template);
        sqlx::query(&sql)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::Provision(format!("{}: {}", schema, e)))?;
    }
    Ok(())
}

pub struct PostgresProvisioner {
    pool: PgPool,
}

impl PostgresProvisioner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaProvisioner for PostgresProvisioner {
    async fn provision(&self, schema: &SchemaName) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        provision_in(&mut tx, schema).await?;
        tx.commit().await?;
        info!("Provisioned namespace {}", schema);
        Ok(())
    }

    async fn teardown(&self, schema: &SchemaName) -> Result<(), AppError> {
        let sql = Namespace::new(Dialect::Postgres, schema).render("DROP SCHEMA IF EXISTS {schema} CASCADE");
        sqlx::query(&sql).execute(&self.pool).await?;
        info!("Dropped namespace {}", schema);
        Ok(())
    }

    async fn list_namespaces(&self) -> Result<Vec<SchemaName>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT table_schema FROM information_schema.tables \
             WHERE table_name = 'appointments' AND table_schema <> 'public' \
             ORDER BY table_schema",
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(raw,)| match SchemaName::parse(&raw) {
                Ok(schema) => Some(schema),
                Err(e) => {
                    warn!("Ignoring schema {:?}: {}", raw, e);
                    None
                }
            })
            .collect())
    }
}
