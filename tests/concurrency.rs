use acadmanage::{build_router, connect, ensure_tables, AppState, Settings};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::json;
use std::collections::HashMap;
use tempfile::TempDir;
use tower::ServiceExt;

const REQUESTS: usize = 40;

async fn file_backed_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("temp dir");
    let settings = Settings {
        database_url: format!("sqlite://{}", dir.path().join("acadmanage.sqlite3").display()),
        ..Settings::default()
    };
    let pool = connect(&settings).await.expect("file database");
    ensure_tables(&pool).await.expect("tables");
    (dir, build_router(AppState::new(pool), &settings))
}

async fn post_students(app: &Router, roll_numbers: Vec<String>) -> HashMap<StatusCode, usize> {
    let handles: Vec<_> = roll_numbers
        .into_iter()
        .map(|roll_number| {
            let app = app.clone();
            tokio::spawn(async move {
                let body = json!({"first_name": "John", "roll_number": roll_number});
                let request = Request::builder()
                    .method(Method::POST)
                    .uri("/api/student")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            })
        })
        .collect();

    let mut counts = HashMap::new();
    for handle in handles {
        *counts.entry(handle.await.unwrap()).or_insert(0) += 1;
    }
    counts
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_distinct_roll_numbers_all_succeed() {
    let (_dir, app) = file_backed_app().await;
    let counts = post_students(&app, (0..REQUESTS).map(|i| format!("R{i}")).collect()).await;
    assert_eq!(counts.get(&StatusCode::CREATED), Some(&REQUESTS), "{counts:?}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_with_shared_roll_number_conflict() {
    let (_dir, app) = file_backed_app().await;
    let counts = post_students(&app, vec!["CE001".to_string(); REQUESTS]).await;
    assert_eq!(counts.get(&StatusCode::CREATED), Some(&1), "{counts:?}");
    assert_eq!(counts.get(&StatusCode::CONFLICT), Some(&(REQUESTS - 1)), "{counts:?}");
}
