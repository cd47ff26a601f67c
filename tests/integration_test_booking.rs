mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::{json, Value};

struct Shop {
    barber: String,
    customer: String,
}

async fn setup(app: &TestApp) -> Shop {
    app.create_tenant("Joe's", "joes_shop").await;
    app.signup("joes_shop", "Bob", "bob@x.com", "pw", "barber").await;
    app.signup("joes_shop", "Al", "al@x.com", "pw", "customer").await;
    Shop {
        barber: app.login("joes_shop", "bob@x.com", "pw").await,
        customer: app.login("joes_shop", "al@x.com", "pw").await,
    }
}

async fn create_service(app: &TestApp, token: &str, body: Value) -> (StatusCode, Value) {
    app.request("POST", "/api/services/create", Some(token), None, Some(body)).await
}

#[tokio::test]
async fn test_barber_manages_services() {
    let app = TestApp::new().await;
    let shop = setup(&app).await;

    let (status, body) = create_service(&app, &shop.barber, json!({"name": "Haircut", "price": 25})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Service created successfully");

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let (status, _) = create_service(&app, &shop.barber, json!({"name": "Shave", "price": "12.5"})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, services) = app.request("GET", "/api/services", Some(&shop.customer), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let services = services.as_array().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0]["name"], "Shave");
    assert_eq!(services[0]["price"], "12.50");
    assert_eq!(services[1]["price"], "25.00");
}

#[tokio::test]
async fn test_service_creation_rules() {
    let app = TestApp::new().await;
    let shop = setup(&app).await;

    let (status, _) = create_service(&app, &shop.customer, json!({"name": "Haircut", "price": 25})).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = create_service(&app, &shop.barber, json!({"name": "Haircut"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields required");

    let (status, _) = create_service(&app, &shop.barber, json!({"name": "Haircut", "price": -1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("GET", "/api/services", None, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_flow() {
    let app = TestApp::new().await;
    let shop = setup(&app).await;
    create_service(&app, &shop.barber, json!({"name": "Haircut", "price": 25})).await;
    let (_, services) = app.request("GET", "/api/services", Some(&shop.customer), None, None).await;
    let service_id = services[0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .request(
            "POST",
            "/api/appointments/book",
            Some(&shop.customer),
            None,
            Some(json!({"serviceId": service_id, "appointmentTime": "2025-03-01T10:30"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Appointment booked successfully");

    let (status, _) = app
        .request(
            "POST",
            "/api/appointments/book",
            Some(&shop.customer),
            None,
            Some(json!({"serviceId": service_id, "appointmentTime": "2025-03-02T09:00:00Z"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, mine) = app.request("GET", "/api/appointments/my", Some(&shop.customer), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["status"], "pending");
    assert_eq!(mine[0]["service_name"], "Haircut");
    assert!(mine[0]["appointment_time"].as_str().unwrap().starts_with("2025-03-02"));
    assert!(mine[0].get("customer_name").is_none());

    let (_, barber_mine) = app.request("GET", "/api/appointments/my", Some(&shop.barber), None, None).await;
    assert!(barber_mine.as_array().unwrap().is_empty());

    let (status, all) = app.request("GET", "/api/appointments/all", Some(&shop.barber), None, None).await;
    assert_eq!(status, StatusCode::OK);
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1]["customer_name"], "Al");

    let (status, _) = app.request("GET", "/api/appointments/all", Some(&shop.customer), None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_booking_validation() {
    let app = TestApp::new().await;
    let shop = setup(&app).await;

    let (status, body) = app
        .request("POST", "/api/appointments/book", Some(&shop.customer), None, Some(json!({"serviceId": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields required");

    let (status, _) = app
        .request(
            "POST",
            "/api/appointments/book",
            Some(&shop.customer),
            None,
            Some(json!({"serviceId": "missing", "appointmentTime": "2025-03-01T10:30"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request(
            "POST",
            "/api/appointments/book",
            Some(&shop.customer),
            None,
            Some(json!({"serviceId": "x", "appointmentTime": "next tuesday"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid appointment time");
}

#[tokio::test]
async fn test_signup_and_login_rules() {
    let app = TestApp::new().await;
    setup(&app).await;

    let (status, body) = app
        .request(
            "POST",
            "/api/tenants/signup",
            None,
            Some("joes_shop"),
            Some(json!({"name": "Al", "email": "al@x.com", "password": "pw", "role": "customer"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");

    let (status, _) = app
        .request(
            "POST",
            "/api/tenants/signup",
            None,
            Some("joes_shop"),
            Some(json!({"name": "Eve", "email": "eve@x.com", "password": "pw", "role": "superadmin"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .request("POST", "/api/tenants/signup", None, Some("joes_shop"), Some(json!({"name": "Eve"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields required");

    let (wrong_status, wrong_body) = app
        .request("POST", "/api/tenants/login", None, Some("joes_shop"), Some(json!({"email": "al@x.com", "password": "bad"})))
        .await;
    let (unknown_status, unknown_body) = app
        .request("POST", "/api/tenants/login", None, Some("joes_shop"), Some(json!({"email": "nobody@x.com", "password": "bad"})))
        .await;
    assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["message"], "Invalid credentials");

    let (status, body) = app
        .request("POST", "/api/tenants/login", None, Some("joes_shop"), Some(json!({"email": "bob@x.com", "password": "pw"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["role"], "barber");
}

#[tokio::test]
async fn test_malformed_bodies_are_validation_errors() {
    let app = TestApp::new().await;
    let shop = setup(&app).await;

    let (status, body) = create_service(&app, &shop.barber, json!({"name": "Cut", "price": true})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON"), "{body:?}");

    let (status, body) = app
        .request(
            "POST",
            "/api/tenants/signup",
            None,
            Some("joes_shop"),
            Some(json!({"name": "Eve", "email": 5, "password": "pw", "role": "customer"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = app.request("POST", "/api/tenants/login", None, Some("joes_shop"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing 'Content-Type: application/json' header");
}
