//! Router-level tests that run without a reachable database. The driver
//! connects lazily, so every path exercised here stays in front of the
//! first store call.
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
};
use http_body_util::BodyExt;
use mongodb::Client;
use serde_json::{Value, json};
use tower::ServiceExt;

use readly::{app, config::Config, error::AppError, state::AppState};

async fn test_app() -> Router {
    let config = Config {
        port: 3000,
        db_user: "test".to_string(),
        db_pass: "test".to_string(),
        db_host: "localhost".to_string(),
    };

    let client = Client::with_uri_str("mongodb://localhost:27017/?serverSelectionTimeoutMS=100")
        .await
        .unwrap();

    app(AppState::from_database(config, client.database("readly-test")))
}

#[tokio::test]
async fn banner_reports_liveness() {
    let response = test_app()
        .await
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"Readly is reading and writing blogs");
}

#[tokio::test]
async fn malformed_blog_id_fails_before_store_access() {
    let response = test_app()
        .await
        .oneshot(Request::get("/blogs/not-an-id").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_wish_id_fails_before_store_access() {
    let response = test_app()
        .await
        .oneshot(
            Request::delete("/wishlist/zzz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wishlist_listing_requires_email_param() {
    let response = test_app()
        .await
        .oneshot(Request::get("/wishlist").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = test_app()
        .await
        .oneshot(Request::get("/authors").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wishlist_conflict_body_is_fixed_message() {
    let response = AppError::AlreadyInWishlist.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({ "message": "Already in wishlist" }));
}
