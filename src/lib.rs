//! Backend for the Readly blog platform.
//!
//! A single Axum service over three MongoDB collections: `blogs`,
//! `comments`, and `wishlist`. Blogs and comments are stored as opaque
//! documents exactly as the client sent them; wishlist entries carry the
//! two fields the service actually reads (`blogId`, `email`) plus whatever
//! else the client included.
//!
//! The wishlist invariant (one entry per blog and email) is enforced by a
//! unique compound index created at startup, so concurrent duplicate
//! requests cannot both land.
//!
//! # Environment
//!
//! - `PORT` — listen port, defaults to 3000
//! - `DB_USER` / `DB_PASS` — Atlas credentials, required
//! - `DB_HOST` — cluster hostname, defaults to the production cluster
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use routes::{
    banner_handler, create_blog_handler, create_comment_handler, create_wish_handler,
    delete_wish_handler, featured_blogs_handler, get_blog_handler, list_blogs_handler,
    list_comments_handler, list_wishlist_handler,
};
use state::AppState;

/// Builds the full route table over a prepared state.
///
/// Split out of [`start_server`] so tests can drive the router directly.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(banner_handler))
        .route("/blogs", get(list_blogs_handler).post(create_blog_handler))
        .route("/blogs/{id}", get(get_blog_handler))
        .route("/featured-blogs", get(featured_blogs_handler))
        .route(
            "/wishlist",
            get(list_wishlist_handler).post(create_wish_handler),
        )
        .route("/wishlist/{id}", delete(delete_wish_handler))
        .route(
            "/comments",
            get(list_comments_handler).post(create_comment_handler),
        )
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Readly is running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
