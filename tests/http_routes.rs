//! HTTP contract of the fitness routes, driven through `oneshot`.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use fitness_intake::routes::{FitnessRouteState, fitness_routes};
use fitness_intake::store::MemoryStore;
use fitness_intake::{FitnessConfig, FitnessSession};

async fn app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let session = FitnessSession::new(FitnessConfig::for_tests(), store.clone());
    session.load().await.unwrap();
    (fitness_routes(FitnessRouteState { session }), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health() {
    let (app, _) = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn message_advances_the_intake() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/fitness/message",
        Some(json!({ "text": "28 anos, masculino, homem cis" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "medidas");

    let (_, profile) = send(&app, Method::GET, "/api/fitness/profile", None).await;
    assert_eq!(profile["age"], 28);

    let (_, messages) = send(&app, Method::GET, "/api/fitness/messages", None).await;
    assert_eq!(messages.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn blank_message_is_rejected() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/fitness/message",
        Some(json!({ "text": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn patch_profile_reports_regeneration() {
    let (app, _) = app().await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/fitness/profile",
        Some(json!({ "training_days_per_week": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workouts_regenerated"], true);
    assert_eq!(body["diet_regenerated"], false);
    assert_eq!(body["profile"]["training_days_per_week"], 2);

    let (_, workouts) = send(&app, Method::GET, "/api/fitness/workouts", None).await;
    let workouts = workouts.as_array().unwrap().clone();
    assert_eq!(workouts.len(), 2);

    let id = workouts[0]["id"].as_str().unwrap();
    let uri = format!("/api/fitness/workouts/{id}");
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_patch_is_rejected() {
    let (app, _) = app().await;
    let (status, _) = send(&app, Method::PATCH, "/api/fitness/profile", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_patch_is_rejected() {
    let (app, _) = app().await;
    for body in [
        json!({ "age": 500 }),
        json!({ "weight_kg": 80.0 }),
        json!({ "training_days_per_week": 200 }),
        json!({ "weight_kg": 70.0, "height_cm": 90 }),
    ] {
        let (status, resp) = send(&app, Method::PATCH, "/api/fitness/profile", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(resp["error"].is_string());
    }

    let (_, profile) = send(&app, Method::GET, "/api/fitness/profile", None).await;
    assert_eq!(profile["age"], 0);
    assert_eq!(profile["weight_kg"], 0.0);
    let (_, workouts) = send(&app, Method::GET, "/api/fitness/workouts", None).await;
    assert!(workouts.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn workout_hand_edits() {
    let (app, _) = app().await;
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/fitness/workouts",
        Some(json!({ "name": "Extra", "weekday": "Domingo" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/api/fitness/workouts/{id}");

    let (status, workout) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "name": "Full Body",
            "weekday": "Sabado",
            "exercises": [{ "name": "Agachamento", "sets": 3, "reps": "10", "rest": "90s" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workout["id"], id.as_str());
    assert_eq!(workout["name"], "Full Body");

    let (_, workout) = send(&app, Method::PATCH, &uri, Some(json!({ "weekday": "Domingo" }))).await;
    assert_eq!(workout["weekday"], "Domingo");
    assert_eq!(workout["name"], "Full Body");

    let exercises = format!("{uri}/exercises");
    let (_, workout) = send(
        &app,
        Method::POST,
        &exercises,
        Some(json!({ "name": "Remada", "sets": 3, "reps": "12", "rest": "60s" })),
    )
    .await;
    assert_eq!(workout["exercises"].as_array().unwrap().len(), 2);

    let (_, workout) = send(
        &app,
        Method::PUT,
        &format!("{exercises}/1"),
        Some(json!({ "name": "Remada Curvada", "sets": 4, "reps": "10", "rest": "90s" })),
    )
    .await;
    assert_eq!(workout["exercises"][1]["name"], "Remada Curvada");

    let (status, removed) = send(&app, Method::DELETE, &format!("{exercises}/0"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["name"], "Agachamento");
    let (status, _) = send(&app, Method::DELETE, &format!("{exercises}/5"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/fitness/workouts/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, Method::PATCH, &missing, Some(json!({ "name": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn diet_hand_edits() {
    let (app, _) = app().await;
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/fitness/diet/meals/0",
        Some(json!({ "name": "Brunch", "time": "10:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(
        &app,
        Method::PATCH,
        "/api/fitness/profile",
        Some(json!({ "age": 30, "weight_kg": 70.0, "height_cm": 175, "meals_per_day": 4 })),
    )
    .await;
    assert_eq!(body["diet_regenerated"], true);

    let (status, diet) = send(
        &app,
        Method::PUT,
        "/api/fitness/diet/meals/0",
        Some(json!({ "name": "Brunch", "time": "10:30", "foods": [{ "name": "banana", "grams": 120 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(diet["meals"][0]["name"], "Brunch");
    assert_eq!(diet["meals"][0]["foods"][0]["calories"], 107);

    let (_, diet) = send(
        &app,
        Method::POST,
        "/api/fitness/diet/meals/0/foods",
        Some(json!({ "name": "aveia", "grams": 40 })),
    )
    .await;
    assert_eq!(diet["meals"][0]["foods"].as_array().unwrap().len(), 2);

    let (_, diet) = send(
        &app,
        Method::PUT,
        "/api/fitness/diet/meals/0/foods/1",
        Some(json!({ "name": "granola", "grams": 40 })),
    )
    .await;
    assert_eq!(diet["meals"][0]["foods"][1]["name"], "granola");

    let (_, removed) = send(&app, Method::DELETE, "/api/fitness/diet/meals/0/foods/0", None).await;
    assert_eq!(removed["name"], "banana");

    let (_, diet) = send(
        &app,
        Method::POST,
        "/api/fitness/diet/meals",
        Some(json!({ "name": "Ceia", "time": "22:00" })),
    )
    .await;
    assert_eq!(diet["meals"].as_array().unwrap().len(), 5);

    let (_, removed) = send(&app, Method::DELETE, "/api/fitness/diet/meals/4", None).await;
    assert_eq!(removed["name"], "Ceia");

    let (_, diet) = send(
        &app,
        Method::PUT,
        "/api/fitness/diet/macros",
        Some(json!({ "calories": 1800, "protein_g": 140, "carbs_g": 180, "fat_g": 60 })),
    )
    .await;
    assert_eq!(diet["calories"], 1800);
    assert_eq!(diet["meals"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn diet_is_404_until_generated() {
    let (app, _) = app().await;
    let (status, _) = send(&app, Method::GET, "/api/fitness/diet", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_and_status() {
    let (app, store) = app().await;
    let (status, body) = send(&app, Method::POST, "/api/fitness/save", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "saved");
    assert!(body["status"]["last_saved_at"].is_string());
    assert_eq!(store.write_counts().save_profile, 1);

    store.set_fail_writes(true);
    let (status, body) = send(&app, Method::POST, "/api/fitness/save", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["outcome"], "failed");

    let (_, status_body) = send(&app, Method::GET, "/api/fitness/status", None).await;
    assert_eq!(status_body["loaded"], true);
    assert_eq!(status_body["save"]["error"], "Erro ao salvar alguns dados");
    assert_eq!(status_body["pending"]["personal_info"], true);
}

#[tokio::test]
async fn reset_restarts_conversation() {
    let (app, _) = app().await;
    send(
        &app,
        Method::POST,
        "/api/fitness/message",
        Some(json!({ "text": "28 anos, masculino" })),
    )
    .await;

    let (status, body) = send(&app, Method::POST, "/api/fitness/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "info_basica");
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}
