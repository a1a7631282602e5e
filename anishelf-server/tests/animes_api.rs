use axum::{body::Bytes, http::StatusCode};
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;

use support::{anime_payload, create_anime, message, server};

#[tokio::test]
async fn root_returns_welcome_message() {
    let server = server();
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Welcome to the Anime API!" }));
}

#[tokio::test]
async fn health_reports_storage() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["backend"], "memory");
}

#[tokio::test]
async fn create_then_fetch_returns_payload_plus_server_fields() {
    let server = server();
    let mut payload = anime_payload("Monster");
    payload["videoTrailerUrl"] = json!("https://video.example/monster-trailer");

    let created = server.post("/animes").json(&payload).await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    let id = created["id"].as_str().expect("id");

    let fetched = server.get(&format!("/animes/{id}")).await;
    fetched.assert_status_ok();
    let fetched: Value = fetched.json();
    assert_eq!(fetched, created);

    for (key, value) in payload.as_object().expect("object") {
        assert_eq!(&fetched[key], value, "field {key}");
    }
    assert_eq!(fetched["seasons"], json!([]));
    assert_eq!(fetched["version"], 1);
    assert!(fetched["createdAt"].is_string());
    assert!(fetched["updatedAt"].is_string());
}

#[tokio::test]
async fn create_ignores_client_supplied_identity() {
    let server = server();
    let mut payload = anime_payload("Paprika");
    payload["id"] = json!("00000000-0000-0000-0000-000000000000");
    payload["version"] = json!(99);

    let body: Value = server.post("/animes").json(&payload).await.json();
    assert_ne!(body["id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(body["version"], 1);
}

#[tokio::test]
async fn list_projects_summaries_in_creation_order() {
    let server = server();
    let first = create_anime(&server, "Perfect Blue").await;
    create_anime(&server, "Millennium Actress").await;

    let response = server.get("/animes").await;
    response.assert_status_ok();
    let list: Vec<Value> = response.json();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], first.as_str());
    assert_eq!(list[0]["title"], "Perfect Blue");
    assert_eq!(list[1]["title"], "Millennium Actress");

    let entry = list[0].as_object().expect("object");
    let mut keys: Vec<&str> = entry.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "episodesPerSeason",
            "id",
            "imageUrl",
            "publishedBy",
            "seasonCount",
            "title"
        ]
    );
}

#[tokio::test]
async fn create_validation_failures_are_bad_requests() {
    let server = server();

    let mut missing = anime_payload("Akira");
    missing.as_object_mut().expect("object").remove("publishedBy");
    let response = server.post("/animes").json(&missing).await;
    response.assert_status_bad_request();
    assert!(message(&response.json()).contains("publishedBy"));

    let mut zero = anime_payload("Akira");
    zero["episodesPerSeason"] = json!(0);
    server
        .post("/animes")
        .json(&zero)
        .await
        .assert_status_bad_request();

    let mut wrong_type = anime_payload("Akira");
    wrong_type["seasonCount"] = json!("three");
    server
        .post("/animes")
        .json(&wrong_type)
        .await
        .assert_status_bad_request();

    let duplicate_seasons = json!({
        "title": "Akira",
        "imageUrl": "u",
        "seasonCount": 1,
        "episodesPerSeason": 1,
        "publishedBy": "TMS",
        "seasons": [{"number": 1}, {"number": 1}]
    });
    server
        .post("/animes")
        .json(&duplicate_seasons)
        .await
        .assert_status_bad_request();

    let list: Vec<Value> = server.get("/animes").await.json();
    assert!(list.is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request_with_message() {
    let server = server();
    let response = server
        .post("/animes")
        .bytes(Bytes::from_static(b"{\"title\": "))
        .content_type("application/json")
        .await;
    response.assert_status_bad_request();
    assert!(!message(&response.json()).is_empty());
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let server = server();

    for path in [
        "/animes/0191d2b4-4c1f-7cc3-b1d5-5b8a1f0e9a10",
        "/animes/not-a-uuid",
    ] {
        let response = server.get(path).await;
        response.assert_status_not_found();
        assert_eq!(message(&response.json()), "Anime not found");
    }

    server
        .put("/animes/not-a-uuid")
        .json(&json!({"title": "x"}))
        .await
        .assert_status_not_found();
    server
        .delete("/animes/not-a-uuid")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn update_merges_top_level_fields() {
    let server = server();
    let id = create_anime(&server, "Kaiba").await;

    let response = server
        .put(&format!("/animes/{id}"))
        .json(&json!({"title": "Kaiba (2008)", "seasonCount": 3}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "Kaiba (2008)");
    assert_eq!(body["seasonCount"], 3);
    assert_eq!(body["publishedBy"], "Madhouse");
    assert_eq!(body["version"], 2);

    let response = server
        .put(&format!("/animes/{id}"))
        .json(&json!({"imageUrl": ""}))
        .await;
    response.assert_status_bad_request();

    let stored: Value = server.get(&format!("/animes/{id}")).await.json();
    assert_eq!(stored["imageUrl"], "https://img.example/kaiba.jpg");
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let server = server();
    let id = create_anime(&server, "Dennou Coil").await;

    server
        .delete(&format!("/animes/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server.get(&format!("/animes/{id}")).await;
    response.assert_status_not_found();
    assert_eq!(message(&response.json()), "Anime not found");

    server
        .delete(&format!("/animes/{id}"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn unmatched_routes_return_not_found_message() {
    let server = server();

    let response = server.get("/mangas").await;
    response.assert_status_not_found();
    response.assert_json(&json!({ "message": "Not Found" }));

    let response = server.patch("/animes").await;
    response.assert_status_not_found();
    response.assert_json(&json!({ "message": "Not Found" }));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let server = server();
    let response = server
        .get("/animes")
        .add_header("Origin", "https://frontend.example")
        .await;
    response.assert_status_ok();
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn update_with_null_trailer_clears_it() {
    let server = server();
    let mut payload = anime_payload("Kemono Jihen");
    payload["videoTrailerUrl"] = json!("https://video.example/trailer");
    let created: Value = server.post("/animes").json(&payload).await.json();
    let id = created["id"].as_str().expect("id");

    let body: Value = server
        .put(&format!("/animes/{id}"))
        .json(&json!({ "title": "Kemono Jihen (2021)" }))
        .await
        .json();
    assert_eq!(body["videoTrailerUrl"], "https://video.example/trailer");

    let response = server
        .put(&format!("/animes/{id}"))
        .json(&json!({ "videoTrailerUrl": null }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body.get("videoTrailerUrl").is_none());
}
