use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::{info, warn};
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::models::user::Admin;
use crate::domain::ports::{
    AdminRepository, AppointmentRepository, SchemaProvisioner, ServiceRepository,
    TenantRepository, UserRepository,
};
use crate::domain::services::{auth_service::AuthService, tenant_service::TenantService};
use crate::error::AppError;
use crate::infra::provisioning::{postgres::PostgresProvisioner, sqlite::SqliteProvisioner};
use crate::infra::repositories::{
    postgres_admin_repo::PostgresAdminRepo, postgres_appointment_repo::PostgresAppointmentRepo,
    postgres_service_repo::PostgresServiceRepo, postgres_tenant_repo::PostgresTenantRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_admin_repo::SqliteAdminRepo, sqlite_appointment_repo::SqliteAppointmentRepo,
    sqlite_service_repo::SqliteServiceRepo, sqlite_tenant_repo::SqliteTenantRepo,
    sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

struct Repositories {
    tenant_repo: Arc<dyn TenantRepository>,
    admin_repo: Arc<dyn AdminRepository>,
    user_repo: Arc<dyn UserRepository>,
    service_repo: Arc<dyn ServiceRepository>,
    appointment_repo: Arc<dyn AppointmentRepository>,
    provisioner: Arc<dyn SchemaProvisioner>,
}

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let database_url = &config.database_url;

    let repos = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let opts = PgConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        run_postgres_migrations(&pool).await?;

        Repositories {
            tenant_repo: Arc::new(PostgresTenantRepo::new(pool.clone())),
            admin_repo: Arc::new(PostgresAdminRepo::new(pool.clone())),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            service_repo: Arc::new(PostgresServiceRepo::new(pool.clone())),
            appointment_repo: Arc::new(PostgresAppointmentRepo::new(pool.clone())),
            provisioner: Arc::new(PostgresProvisioner::new(pool)),
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        run_sqlite_migrations(&pool).await?;

        Repositories {
            tenant_repo: Arc::new(SqliteTenantRepo::new(pool.clone())),
            admin_repo: Arc::new(SqliteAdminRepo::new(pool.clone())),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            service_repo: Arc::new(SqliteServiceRepo::new(pool.clone())),
            appointment_repo: Arc::new(SqliteAppointmentRepo::new(pool.clone())),
            provisioner: Arc::new(SqliteProvisioner::new(pool)),
        }
    };

    let auth_service = Arc::new(AuthService::new(config)?);
    let tenant_service = Arc::new(TenantService::new(repos.tenant_repo, repos.provisioner.clone()));

    Ok(AppState {
        config: config.clone(),
        admin_repo: repos.admin_repo,
        user_repo: repos.user_repo,
        service_repo: repos.service_repo,
        appointment_repo: repos.appointment_repo,
        provisioner: repos.provisioner,
        tenant_service,
        auth_service,
    })
}

/// Creates the configured super-admin unless one with that email already exists.
pub async fn seed_superadmin(state: &AppState) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (&state.config.superadmin_email, &state.config.superadmin_password) else {
        return Ok(());
    };

    if state.admin_repo.find_by_email(email).await?.is_some() {
        return Ok(());
    }

    let hash = state.auth_service.hash_password(password)?;
    let admin = state.admin_repo.create(&Admin::new(email.clone(), hash)).await?;
    info!("Seeded super-admin {}", admin.id);
    Ok(())
}

/// Warns about namespaces with no registry row and drops them when configured to.
pub async fn reconcile_namespaces(state: &AppState) -> Result<(), AppError> {
    let orphans = state.tenant_service.find_orphaned_namespaces().await?;
    if orphans.is_empty() {
        return Ok(());
    }

    for schema in &orphans {
        warn!("Namespace {} has no tenant registry entry", schema);
    }

    if state.config.cleanup_orphaned_namespaces {
        let removed = state.tenant_service.cleanup_orphaned_namespaces().await?;
        info!("Removed {} orphaned namespaces", removed.len());
    }
    Ok(())
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to run Postgres migrations: {}", e)))
}

async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to run SQLite migrations: {}", e)))
}
