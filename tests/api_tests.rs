use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, Set};
use showdex::api::AppState;
use showdex::config::Config;
use showdex::entities::{genres, show_genres, tv_shows};
use std::sync::Arc;
use tower::ServiceExt;

const TEST_API_KEY: &str = "integration-test-key";

async fn spawn_app() -> (Arc<AppState>, Router) {
    spawn_app_with(|config| {
        config.server.api_key = Some(TEST_API_KEY.to_string());
    })
    .await
}

async fn spawn_app_with(adjust: impl FnOnce(&mut Config)) -> (Arc<AppState>, Router) {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    adjust(&mut config);

    let state = showdex::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    let router = showdex::api::router(state.clone());
    (state, router)
}

fn show(id: i32, name: &str, first_air: NaiveDate, status: &str) -> tv_shows::ActiveModel {
    tv_shows::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        original_name: Set(name.to_string()),
        first_air_date: Set(first_air),
        status: Set(status.to_string()),
        ..Default::default()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Twelve shows with ids 1..=12, air dates marching through 2014-2016.
async fn seed_catalog(state: &AppState) {
    for id in 1..=12 {
        let year = 2014 + (id - 1) / 4;
        let month = 1 + ((id - 1) % 4) as u32 * 3;
        let status = if id % 2 == 0 { "Ended" } else { "Returning Series" };

        show(id, &format!("Show {id}"), date(year, month, 1), status)
            .insert(&state.store.conn)
            .await
            .expect("failed to seed show");
    }
}

async fn get(app: &Router, uri: &str, api_key: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }

    let response = app
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[tokio::test]
async fn test_health_endpoints_are_open() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "ok" }));

    let (status, body) = get(&app, "/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "ready" }));
}

#[tokio::test]
async fn test_api_requires_key() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/api/tvshows", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, "/api/tvshows", Some("wrong-key")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/api/tvshows", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_secondary_keys_are_accepted() {
    let (_, app) = spawn_app_with(|config| {
        config.server.api_key = Some("primary".to_string());
        config.server.api_keys = vec!["second".to_string(), "third".to_string()];
    })
    .await;

    let (status, _) = get(&app, "/api/tvshows", Some("second")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/tvshows", Some("fourth")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_key_configuration_fails_closed() {
    let (_, app) = spawn_app_with(|_| {}).await;

    let (status, body) = get(&app, "/api/tvshows", Some("any-key")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Server missing API key configuration");
}

#[tokio::test]
async fn test_paginated_list() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/tvshows?page=2&limit=5", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    let ids: Vec<i64> = data.iter().map(|s| s["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![6, 7, 8, 9, 10]);

    assert_eq!(
        body["pagination"],
        serde_json::json!({
            "current_page": 2,
            "items_per_page": 5,
            "total_items": 12,
            "total_pages": 3,
        })
    );
}

#[tokio::test]
async fn test_list_defaults() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/tvshows", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 12);
    assert_eq!(body["pagination"]["current_page"], 1);
    assert_eq!(body["pagination"]["items_per_page"], 20);
    assert_eq!(body["pagination"]["total_pages"], 1);
}

#[tokio::test]
async fn test_list_rejects_bad_paging() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/api/tvshows?page=0", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["details"].as_array().is_some_and(|d| !d.is_empty()));

    let (status, _) = get(&app, "/api/tvshows?limit=101", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&app, "/api/tvshows?page=x&limit=0", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_year_filter() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(
        &app,
        "/api/tvshows/filter/year?start_year=2015&end_year=2015",
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 4);
    let dates: Vec<&str> = data
        .iter()
        .map(|s| s["first_air_date"].as_str().unwrap())
        .collect();
    assert!(dates.iter().all(|d| d.starts_with("2015")));

    let mut sorted = dates.clone();
    sorted.sort_unstable();
    assert_eq!(dates, sorted);

    assert_eq!(body["pagination"]["total_items"], 4);
}

#[tokio::test]
async fn test_year_filter_rejects_inverted_range() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(
        &app,
        "/api/tvshows/filter/year?start_year=2016&end_year=2015",
        Some(TEST_API_KEY),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_year_filter_requires_both_years() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/api/tvshows/filter/year", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d.as_str().unwrap().contains("start_year")));
    assert!(details.iter().any(|d| d.as_str().unwrap().contains("end_year")));
}

#[tokio::test]
async fn test_random_sample() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/tvshows/random", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert!(body.get("pagination").is_none());

    let (_, body) = get(&app, "/api/tvshows/random?limit=3", Some(TEST_API_KEY)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    // Table holds 12 rows; asking for up to the cap returns them all.
    let (_, body) = get(&app, "/api/tvshows/random?limit=50", Some(TEST_API_KEY)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 12);

    let (status, _) = get(&app, "/api/tvshows/random?limit=51", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_legacy_full_listing() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/shows", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 12);
    // The full projection carries the artwork columns (null here).
    assert!(data[0].as_object().unwrap().contains_key("poster_url"));
    assert!(body.get("pagination").is_none());
}

#[tokio::test]
async fn test_search_by_name_is_case_insensitive() {
    let (state, app) = spawn_app().await;

    show(1, "Breaking Bad", date(2008, 1, 20), "Ended")
        .insert(&state.store.conn)
        .await
        .unwrap();
    tv_shows::ActiveModel {
        id: Set(2),
        name: Set("Dark".to_string()),
        original_name: Set("Dunkel".to_string()),
        first_air_date: Set(date(2017, 12, 1)),
        status: Set("Ended".to_string()),
        ..Default::default()
    }
    .insert(&state.store.conn)
    .await
    .unwrap();

    let (_, lower) = get(&app, "/api/shows/by-name/breaking", Some(TEST_API_KEY)).await;
    let (_, upper) = get(&app, "/api/shows/by-name/BREAKING", Some(TEST_API_KEY)).await;
    assert_eq!(lower["data"], upper["data"]);
    assert_eq!(lower["data"].as_array().unwrap().len(), 1);
    assert_eq!(lower["data"][0]["id"], 1);

    // Substring of the original name matches too.
    let (_, body) = get(&app, "/api/shows/by-name/dunkel", Some(TEST_API_KEY)).await;
    assert_eq!(body["data"][0]["id"], 2);
}

#[tokio::test]
async fn test_filter_by_status_is_exact() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/shows/by-status/Ended", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 6);
    assert!(data.iter().all(|s| s["status"] == "Ended"));

    // No case-folding, no partial matching.
    let (_, body) = get(&app, "/api/shows/by-status/ended", Some(TEST_API_KEY)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_filter_by_genre() {
    let (state, app) = spawn_app().await;

    for (id, name, first_air) in [
        (1, "The Expanse", date(2015, 12, 14)),
        (2, "Chernobyl", date(2019, 5, 6)),
    ] {
        show(id, name, first_air, "Ended")
            .insert(&state.store.conn)
            .await
            .unwrap();
    }

    for (id, name) in [(1, "Sci-Fi & Fantasy"), (2, "Drama"), (3, "Mystery")] {
        genres::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
        }
        .insert(&state.store.conn)
        .await
        .unwrap();
    }

    // The Expanse: Sci-Fi & Fantasy + Mystery; Chernobyl: Drama.
    for (show_id, genre_id) in [(1, 1), (1, 3), (2, 2)] {
        show_genres::ActiveModel {
            show_id: Set(show_id),
            genre_id: Set(genre_id),
        }
        .insert(&state.store.conn)
        .await
        .unwrap();
    }

    let (status, body) = get(&app, "/api/shows/by-genre/sci-fi", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], 1);

    // "y" is a substring of both of The Expanse's genres; the join still
    // yields the show once.
    let (_, body) = get(&app, "/api/shows/by-genre/y", Some(TEST_API_KEY)).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);

    let (_, body) = get(&app, "/api/shows/by-genre/drama", Some(TEST_API_KEY)).await;
    assert_eq!(body["data"][0]["id"], 2);
}

#[tokio::test]
async fn test_show_by_id() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/shows/7", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 7);
    assert_eq!(body["data"]["name"], "Show 7");
}

#[tokio::test]
async fn test_show_by_id_miss_is_soft() {
    let (state, app) = spawn_app().await;
    seed_catalog(&state).await;

    let (status, body) = get(&app, "/api/shows/9999", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn test_show_by_id_rejects_garbage() {
    let (_, app) = spawn_app().await;

    let (status, body) = get(&app, "/api/shows/not-a-number", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = get(&app, "/api/shows/-4", Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_metrics_endpoint_is_gated() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/metrics")
                .header("X-API-Key", TEST_API_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
