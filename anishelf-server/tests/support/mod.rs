#![allow(dead_code)]

use std::sync::Arc;

use anishelf_core::{AnimeCatalog, AnimeRepository, StorageBackend, StorageContext};
use anishelf_server::{AppState, create_app};
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

pub fn server() -> TestServer {
    let storage = StorageContext::in_memory();
    TestServer::new(create_app(AppState::from_storage(&storage)))
        .expect("test server should start")
}

pub fn server_with_repository(repository: Arc<dyn AnimeRepository>) -> TestServer {
    let state =
        AppState::new(AnimeCatalog::new(repository), StorageBackend::Memory);
    TestServer::new(create_app(state)).expect("test server should start")
}

pub fn anime_payload(title: &str) -> Value {
    json!({
        "title": title,
        "imageUrl": format!("https://img.example/{}.jpg", title.to_lowercase()),
        "seasonCount": 1,
        "episodesPerSeason": 12,
        "publishedBy": "Madhouse"
    })
}

/// Create an anime and return its id.
pub async fn create_anime(server: &TestServer, title: &str) -> String {
    let response = server.post("/animes").json(&anime_payload(title)).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .expect("created anime has an id")
        .to_string()
}

pub async fn add_season(server: &TestServer, id: &str, number: i64) {
    server
        .post(&format!("/animes/{id}/seasons"))
        .json(&json!({ "number": number }))
        .await
        .assert_status(StatusCode::CREATED);
}

pub async fn add_episode(
    server: &TestServer,
    id: &str,
    season: i64,
    number: i64,
    title: &str,
) {
    server
        .post(&format!("/animes/{id}/seasons/{season}/episodes"))
        .json(&json!({
            "number": number,
            "title": title,
            "videoUrl": format!("https://video.example/{season}/{number}")
        }))
        .await
        .assert_status(StatusCode::CREATED);
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
