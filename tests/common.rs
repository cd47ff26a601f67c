use barber_booking::{
    api::router::create_router,
    config::Config,
    infra::factory::{bootstrap_state, seed_superadmin},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_EMAIL: &str = "root@barber.test";
pub const ADMIN_PASSWORD: &str = "root-password";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub db_filename: String,
    pub db_url: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            auth_issuer: "test-issuer".to_string(),
            cors_origin: None,
            // Cheap hashes keep the suite fast.
            password_hash_iterations: 1,
            password_hash_memory_kib: 1024,
            superadmin_email: Some(ADMIN_EMAIL.to_string()),
            superadmin_password: Some(ADMIN_PASSWORD.to_string()),
            cleanup_orphaned_namespaces: false,
            log_dir: "./logs".to_string(),
        };

        let state = bootstrap_state(&config).await.expect("Failed to bootstrap test state");
        seed_superadmin(&state).await.expect("Failed to seed super-admin");

        let state = Arc::new(state);
        let router = create_router(state.clone());

        Self {
            router,
            db_filename,
            db_url,
            state,
        }
    }

    /// A second pool on the same database file, for setting up storage directly.
    pub async fn pool(&self) -> SqlitePool {
        SqlitePool::connect(&self.db_url).await.expect("Failed to open test db")
    }

    /// Sends a request and returns the status with the JSON body (`Null` when
    /// the body is empty or not JSON).
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        tenant: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(tenant) = tenant {
            builder = builder.header("x-tenant-id", tenant);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/admin/login",
                None,
                None,
                Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {:?}", body);
        body["token"].as_str().expect("No token in admin login").to_string()
    }

    /// Creates a tenant as the seeded super-admin and returns its JSON.
    pub async fn create_tenant(&self, name: &str, schema_name: &str) -> Value {
        let token = self.admin_token().await;
        let (status, body) = self
            .request(
                "POST",
                "/api/tenants",
                Some(&token),
                None,
                Some(json!({"name": name, "schema_name": schema_name})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "tenant creation failed: {:?}", body);
        body["tenant"].clone()
    }

    pub async fn signup(&self, schema: &str, name: &str, email: &str, password: &str, role: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/tenants/signup",
                None,
                Some(schema),
                Some(json!({"name": name, "email": email, "password": password, "role": role})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {:?}", body);
        body["user"].clone()
    }

    pub async fn login(&self, schema: &str, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/tenants/login",
                None,
                Some(schema),
                Some(json!({"email": email, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {:?}", body);
        body["token"].as_str().expect("No token in login").to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
