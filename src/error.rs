use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed identifier")]
    MalformedId,

    #[error("Already in wishlist")]
    AlreadyInWishlist,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MalformedId => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),

            AppError::AlreadyInWishlist => (
                StatusCode::CONFLICT,
                Json(json!({ "message": "Already in wishlist" })),
            )
                .into_response(),

            AppError::Database(err) => {
                error!("Database operation failed: {err}");

                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
