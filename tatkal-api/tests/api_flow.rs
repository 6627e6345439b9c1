use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tatkal_api::{app, AppState, AuthConfig};
use tatkal_booking::{BookingEngine, BookingRules, TrainDirectory};
use tatkal_core::repository::TrainRepository;
use tatkal_core::train::NewTrain;
use tatkal_store::{MemoryBookingRepository, MemoryTrainRepository, MemoryUserRepository};

fn delhi_mumbai_train(seats: i32) -> NewTrain {
    NewTrain {
        name: "Rajdhani Express".to_string(),
        number: 12951,
        from_station: "Delhi".to_string(),
        to_station: "Mumbai".to_string(),
        departure_time: None,
        arrival_time: None,
        running_days: "MTW".to_string(),
        delay_days: None,
        scheduled_date: None,
        actual_running_date: None,
        sleeper: true,
        ac3_tier: false,
        ac2_tier: false,
        ac_first_class: false,
        sleeper_seats_available: seats,
        ac3_tier_seats_available: 0,
        ac2_tier_seats_available: 0,
        ac_first_class_seats_available: 0,
    }
}

async fn setup() -> (Router, i64) {
    let trains = Arc::new(MemoryTrainRepository::new());
    let bookings = Arc::new(MemoryBookingRepository::new());
    let users = Arc::new(MemoryUserRepository::new());
    let train = trains.insert(delhi_mumbai_train(2)).await.unwrap();

    let engine = Arc::new(BookingEngine::new(
        trains.clone(),
        bookings.clone(),
        BookingRules::default(),
    ));
    let directory = Arc::new(TrainDirectory::new(trains.clone()));

    let state = AppState {
        users,
        bookings,
        engine,
        directory,
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration_seconds: 3600,
        },
    };
    (app(state), train.id)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register(app: &Router, email: &str, username: &str, role: Option<&str>) -> String {
    let mut payload = json!({
        "username": username,
        "full_name": "Test Traveller",
        "password": "secret123",
        "email": email,
        "phone_number": "9876543210",
    });
    if let Some(role) = role {
        payload["role"] = json!(role);
    }
    let (status, body) = send(app, json_request("POST", "/register", None, Some(&payload))).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn booking_payload(train_id: i64, tickets: usize) -> Value {
    let passengers: Vec<Value> = (0..tickets)
        .map(|i| {
            json!({
                "name": format!("Passenger {i}"),
                "age": 30 + i,
                "national_id": format!("{:012}", 100_000_000_000u64 + i as u64),
            })
        })
        .collect();
    json!({
        "train_id": train_id,
        "seat_class": "SLEEPER",
        "number_of_tickets": tickets,
        "passengers": passengers,
    })
}

#[tokio::test]
async fn test_register_and_login() {
    let (app, _) = setup().await;

    let token = register(&app, "asha@example.com", "asha", None).await;
    assert!(!token.is_empty());

    // Same email again is a conflict.
    let payload = json!({
        "username": "asha2",
        "full_name": "Asha Again",
        "password": "secret123",
        "email": "asha@example.com",
        "phone_number": "9876543210",
    });
    let (status, body) = send(&app, json_request("POST", "/register", None, Some(&payload))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "DATA_INTEGRITY_VIOLATION");

    let login = json!({ "email": "asha@example.com", "password": "secret123" });
    let (status, body) = send(&app, json_request("POST", "/login", None, Some(&login))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert!(body["token"].is_string());

    let bad_login = json!({ "email": "asha@example.com", "password": "wrong-pass" });
    let (status, body) = send(&app, json_request("POST", "/login", None, Some(&bad_login))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "AUTHENTICATION_FAILED");
}

#[tokio::test]
async fn test_booking_requires_authentication() {
    let (app, train_id) = setup().await;
    let (status, body) = send(
        &app,
        json_request("POST", "/booking", None, Some(&booking_payload(train_id, 1))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], "AUTHENTICATION_FAILED");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_full_booking_lifecycle() {
    let (app, train_id) = setup().await;
    let token = register(&app, "ravi@example.com", "ravi", None).await;

    // Book both sleeper seats.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/booking",
            Some(&token),
            Some(&booking_payload(train_id, 2)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "SUCCESS");
    assert_eq!(body["remaining_seats"], 0);
    let pnr = body["pnr"].as_str().unwrap().to_string();
    assert_eq!(pnr.len(), 8);

    // Status is public and masks national ids.
    let uri = format!("/booking/status/{pnr}");
    let (status, body) = send(&app, json_request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    let masked = body["passengers"][0]["national_id"].as_str().unwrap();
    assert!(masked.starts_with("XXXXXXXX"));
    assert_eq!(masked.len(), 12);

    // A third seat is not available.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/booking",
            Some(&token),
            Some(&booking_payload(train_id, 1)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "SEATS_NOT_AVAILABLE");

    // Cancel and confirm the PNR is gone.
    let uri = format!("/booking/cancel/{pnr}");
    let (status, body) = send(&app, json_request("DELETE", &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking cancelled successfully");

    let uri = format!("/booking/status/{pnr}");
    let (status, body) = send(&app, json_request("GET", &uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "BOOKING_NOT_FOUND");
}

#[tokio::test]
async fn test_cancel_of_foreign_booking_is_a_404() {
    let (app, train_id) = setup().await;
    let owner = register(&app, "owner@example.com", "owner", None).await;
    let stranger = register(&app, "stranger@example.com", "stranger", None).await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/booking",
            Some(&owner),
            Some(&booking_payload(train_id, 1)),
        ),
    )
    .await;
    let pnr = body["pnr"].as_str().unwrap();

    let uri = format!("/booking/cancel/{pnr}");
    let (status, body) = send(&app, json_request("DELETE", &uri, Some(&stranger), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "BOOKING_NOT_FOUND");
}

#[tokio::test]
async fn test_train_search() {
    let (app, _) = setup().await;

    // 2025-06-04 is a Wednesday; the seeded train runs MTW.
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/trains/search?source=Delhi&destination=Mumbai&date=2025-06-04",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 2025-06-06 is a Friday; no MTW train matches.
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/trains/search?source=Delhi&destination=Mumbai&date=2025-06-06",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "TRAIN_NOT_FOUND");

    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/trains/search?source=Delhi&destination=Mumbai&date=04-06-2025",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "INVALID_REQUEST");

    let (status, _) = send(
        &app,
        json_request("GET", "/trains/search?source=Delhi", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_train_admin_endpoints_are_role_gated() {
    let (app, _) = setup().await;
    let user = register(&app, "user@example.com", "user", None).await;
    let admin = register(&app, "admin@example.com", "admin", Some("ADMIN")).await;

    let new_train = json!({
        "name": "Duronto Express",
        "number": 12213,
        "from_station": "Delhi",
        "to_station": "Pune",
        "running_days": "MTWTFSS",
        "ac2_tier": true,
        "ac2_tier_seats_available": 40,
    });

    let (status, body) = send(
        &app,
        json_request("POST", "/trains", Some(&user), Some(&new_train)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], "ACCESS_DENIED");

    let (status, body) = send(
        &app,
        json_request("POST", "/trains", Some(&admin), Some(&new_train)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Train saved successfully");

    let (status, body) = send(
        &app,
        json_request("GET", "/trains/bookings", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}
