// ABOUTME: HTTP tests for the composed router using tower oneshot requests
// ABOUTME: Covers health, users, plans, tracker, progress, nutrition, profile, and error bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitControl

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fitcontrol_server::config::ServerConfig;
use fitcontrol_server::middleware::REQUEST_ID_HEADER;
use fitcontrol_server::server::{build_router, ServerResources};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::create_test_database;

async fn test_router() -> Result<Router> {
    let database = create_test_database().await?;
    let resources = ServerResources::new(database, Arc::new(ServerConfig::default()))?;
    Ok(build_router(Arc::new(resources)))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn create_user(router: &Router, name: &str) -> Result<Uuid> {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/users",
        Some(json!({ "username": name, "email": format!("{name}@example.com") })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_str().unwrap().parse()?)
}

#[tokio::test]
async fn test_health_and_ready() -> Result<()> {
    let router = test_router().await?;

    let (status, body) = send(&router, Method::GET, "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&router, Method::GET, "/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn test_responses_carry_request_id() -> Result<()> {
    let router = test_router().await?;
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "client-trace-1")
        .body(Body::empty())?;

    let response = router.oneshot(request).await?;
    let echoed = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert_eq!(echoed.to_str()?, "client-trace-1");
    Ok(())
}

#[tokio::test]
async fn test_tracker_and_compliance_flow() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "ana").await?;

    let every_day: Vec<Value> = ["Domingo", "Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado"]
        .iter()
        .map(|day| {
            json!({
                "weekday": day,
                "label": "Full body",
                "activities": [{
                    "name": "Sentadilla",
                    "details": { "kind": "exercise", "sets": 5, "repetitions": 5 }
                }]
            })
        })
        .collect();
    let (status, plan) = send(
        &router,
        Method::POST,
        "/api/plans",
        Some(json!({
            "user_id": user_id,
            "domain": "rutina",
            "name": "5x5",
            "units": every_day,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(plan["is_active"], true);

    let tracker_uri = format!("/api/users/{user_id}/tracker/routine/today");
    let (status, tracker) = send(&router, Method::GET, &tracker_uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tracker["items"].as_array().unwrap().len(), 1);
    assert_eq!(tracker["day_completed"], false);
    let record_id = tracker["items"][0]["record_id"].as_str().unwrap().to_owned();

    let (status, record) = send(
        &router,
        Method::PUT,
        &format!("/api/compliance/{record_id}"),
        Some(json!({ "completed": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["completed"], true);

    let (_, again) = send(&router, Method::GET, &tracker_uri, None).await?;
    assert_eq!(again["items"][0]["record_id"], record_id.as_str());
    assert_eq!(again["day_completed"], true);

    let (status, summary) = send(
        &router,
        Method::GET,
        &format!("/api/users/{user_id}/adherence/routine"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["streak"], 1);
    assert_eq!(summary["calendar"].as_array().unwrap().len(), 35);
    assert_eq!(summary["calendar"][34]["status"], "completed");

    let (status, dashboard) = send(
        &router,
        Method::GET,
        &format!("/api/users/{user_id}/dashboard"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["routine_streak"], 1);
    assert_eq!(dashboard["diet_streak"], 0);
    Ok(())
}

#[tokio::test]
async fn test_bad_date_is_bad_request() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "bruno").await?;

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/users/{user_id}/compliance?date=04/03/2024"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    assert_eq!(body["error"]["retryable"], false);

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/users/{user_id}/compliance?date=2024-03-04"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn test_unknown_resources_are_not_found() -> Result<()> {
    let router = test_router().await?;

    let (status, body) = send(
        &router,
        Method::PUT,
        &format!("/api/compliance/{}", Uuid::new_v4()),
        Some(json!({ "completed": true })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/api/users/{}/adherence/diet", Uuid::new_v4()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_unknown_domain_is_rejected() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "carla").await?;

    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/api/users/{user_id}/adherence/cardio"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    Ok(())
}

#[tokio::test]
async fn test_energy_profile_round_trip() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "dario").await?;
    let uri = format!("/api/users/{user_id}/energy");

    let (status, _) = send(&router, Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, profile) = send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({
            "sex": "male",
            "age": 30,
            "height_cm": 180.0,
            "weight_kg": 80.0,
            "activity_factor": 1.55
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let bmr = profile["bmr"].as_f64().unwrap();
    // 10*80 + 6.25*180 - 5*30 + 5
    assert!((bmr - 1780.0).abs() < 0.01);
    Ok(())
}

fn routine_unit(weekday: &str) -> Value {
    json!({
        "weekday": weekday,
        "label": "Pierna",
        "activities": [{
            "name": "Sentadilla",
            "details": { "kind": "exercise", "sets": 4, "repetitions": 8 }
        }]
    })
}

#[tokio::test]
async fn test_weekday_labels_ignore_case_and_accents() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "elena").await?;

    let (status, plan) = send(
        &router,
        Method::POST,
        "/api/plans",
        Some(json!({
            "user_id": user_id,
            "domain": "routine",
            "name": "Semana",
            "units": [routine_unit("lunes"), routine_unit("MIERCOLES"), routine_unit("sábado")],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let weekdays: Vec<&str> = plan["units"]
        .as_array()
        .unwrap()
        .iter()
        .map(|unit| unit["weekday"].as_str().unwrap())
        .collect();
    assert_eq!(weekdays, vec!["Lunes", "Miércoles", "Sábado"]);
    Ok(())
}

#[tokio::test]
async fn test_malformed_input_gets_error_envelope() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "fabio").await?;

    let (status, body) = send(
        &router,
        Method::POST,
        "/api/plans",
        Some(json!({
            "user_id": user_id,
            "domain": "routine",
            "name": "Semana",
            "units": [routine_unit("Funday")],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    assert_eq!(body["error"]["details"]["location"], "body");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Unknown weekday label"));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"username\": "))?;
    let response = router.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");

    let (status, body) = send(&router, Method::GET, "/api/plans/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
    assert_eq!(body["error"]["details"]["location"], "path");
    Ok(())
}

#[tokio::test]
async fn test_error_bodies_carry_request_id() -> Result<()> {
    let router = test_router().await?;
    let uri = format!("/api/compliance/{}", Uuid::new_v4());

    let request = Request::builder()
        .uri(uri.as_str())
        .header(REQUEST_ID_HEADER, "client-trace-2")
        .body(Body::empty())?;
    let response = router.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["error"]["request_id"], "client-trace-2");

    let (status, body) = send(&router, Method::GET, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["request_id"]
        .as_str()
        .unwrap()
        .starts_with("req_"));
    Ok(())
}

#[tokio::test]
async fn test_user_update() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "gina").await?;
    create_user(&router, "hugo").await?;
    let uri = format!("/api/users/{user_id}");

    let (status, user) = send(&router, Method::PUT, &uri, Some(json!({ "weight_unit": "LB" }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["weight_unit"], "lb");
    assert_eq!(user["username"], "gina");

    let (_, dashboard) = send(&router, Method::GET, &format!("{uri}/dashboard"), None).await?;
    assert_eq!(dashboard["weight_unit"], "lb");

    let (status, body) = send(&router, Method::PUT, &uri, Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (status, _) = send(
        &router,
        Method::PUT,
        &uri,
        Some(json!({ "email": "hugo@example.com" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &router,
        Method::PUT,
        &format!("/api/users/{}", Uuid::new_v4()),
        Some(json!({ "username": "nadie" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_progress_delete() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "iris").await?;

    let (status, entry) = send(
        &router,
        Method::POST,
        &format!("/api/users/{user_id}/progress"),
        Some(json!({ "current_weight": 70.0, "target_weight": 65.0, "goal": "Definir" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/progress/{}", entry["id"].as_str().unwrap());

    let (status, body) = send(&router, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&router, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");

    let (_, history) = send(&router, Method::GET, &format!("/api/users/{user_id}/progress"), None).await?;
    assert_eq!(history, json!([]));
    Ok(())
}

#[tokio::test]
async fn test_meal_nutrition_summary() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "julia").await?;

    let food = |name: &str, calories: f64, grams: f64| {
        json!({
            "name": name,
            "details": {
                "kind": "food",
                "food_type": "Cereal",
                "calories": calories,
                "protein_g": 5.0,
                "fat_g": 1.5,
                "carbs_g": 20.0,
                "grams": grams
            }
        })
    };
    let (status, plan) = send(
        &router,
        Method::POST,
        "/api/plans",
        Some(json!({
            "user_id": user_id,
            "domain": "diet",
            "name": "Volumen",
            "units": [
                {
                    "weekday": "Lunes",
                    "label": "Desayuno",
                    "scheduled_time": "07:30",
                    "activities": [food("Avena", 150.0, 40.0), food("Pan", 120.0, 50.0)]
                },
                { "weekday": "Lunes", "label": "Cena", "scheduled_time": "21:00", "activities": [] }
            ],
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let plan_id = plan["id"].as_str().unwrap();
    let breakfast = plan["units"][0]["id"].as_str().unwrap();
    let dinner = plan["units"][1]["id"].as_str().unwrap();

    let (status, summary) = send(
        &router,
        Method::GET,
        &format!("/api/plans/{plan_id}/units/{breakfast}/nutrition"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert!((summary["total_calories"].as_f64().unwrap() - 270.0).abs() < 1e-9);
    assert!((summary["total_protein_g"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert!((summary["total_grams"].as_f64().unwrap() - 90.0).abs() < 1e-9);

    let (status, summary) = send(
        &router,
        Method::GET,
        &format!("/api/plans/{plan_id}/units/{dinner}/nutrition"),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_calories"].as_f64(), Some(0.0));

    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/api/plans/{plan_id}/units/{}/nutrition", Uuid::new_v4()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_profile_view() -> Result<()> {
    let router = test_router().await?;
    let user_id = create_user(&router, "kevin").await?;

    send(
        &router,
        Method::POST,
        &format!("/api/users/{user_id}/progress"),
        Some(json!({ "current_weight": 90.5, "target_weight": 85.0, "goal": "Bajar" })),
    )
    .await?;

    let (status, profile) = send(&router, Method::GET, &format!("/api/users/{user_id}/profile"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "kevin");
    assert_eq!(profile["email"], "kevin@example.com");
    assert_eq!(profile["weight_unit"], "kg");
    assert_eq!(profile["current_weight"].as_f64(), Some(90.5));
    assert_eq!(profile["routine_streak"], 0);
    assert_eq!(profile["diet_streak"], 0);

    let (status, _) = send(
        &router,
        Method::GET,
        &format!("/api/users/{}/profile", Uuid::new_v4()),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}
