use crate::domain::{
    models::{appointment::{Appointment, AppointmentView}, tenant::SchemaName},
    ports::AppointmentRepository,
};
use crate::error::AppError;
use crate::infra::namespace::{Dialect, Namespace};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresAppointmentRepo {
    pool: PgPool,
}

impl PostgresAppointmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for PostgresAppointmentRepo {
    async fn create(&self, schema: &SchemaName, appointment: &Appointment) -> Result<Appointment, AppError> {
        let sql = Namespace::new(Dialect::Postgres, schema).render(
            "INSERT INTO {appointments} (id, user_id, service_id, appointment_time, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, user_id, service_id, appointment_time, status, created_at",
        );
        sqlx::query_as::<_, Appointment>(&sql)
            .bind(&appointment.id)
            .bind(&appointment.user_id)
            .bind(&appointment.service_id)
            .bind(appointment.appointment_time)
            .bind(appointment.status.as_str())
            .bind(appointment.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_user(&self, schema: &SchemaName, user_id: &str) -> Result<Vec<AppointmentView>, AppError> {
        let sql = Namespace::new(Dialect::Postgres, schema).render(
            "SELECT a.id, a.user_id, a.service_id, a.appointment_time, a.status, a.created_at, s.name AS service_name \
             FROM {appointments} a \
             JOIN {services} s ON a.service_id = s.id \
             WHERE a.user_id = $1 \
             ORDER BY a.appointment_time DESC",
        );
        sqlx::query_as::<_, AppointmentView>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_tenant(&self, schema: &SchemaName) -> Result<Vec<AppointmentView>, AppError> {
        let sql = Namespace::new(Dialect::Postgres, schema).render(
            "SELECT a.id, a.user_id, a.service_id, a.appointment_time, a.status, a.created_at, \
                    s.name AS service_name, u.name AS customer_name \
             FROM {appointments} a \
             JOIN {users} u ON a.user_id = u.id \
             JOIN {services} s ON a.service_id = s.id \
             ORDER BY a.appointment_time DESC",
        );
        sqlx::query_as::<_, AppointmentView>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
