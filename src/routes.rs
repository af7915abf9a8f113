use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};

use crate::{
    database::is_duplicate_key_error,
    error::AppError,
    models::{DeleteAck, InsertAck, Wish, WishlistQuery, parse_object_id},
    state::AppState,
};

/// Blogs listed on the homepage, most recent first.
const FEATURED_LIMIT: i64 = 6;

pub async fn banner_handler() -> &'static str {
    "Readly is reading and writing blogs"
}

pub async fn list_blogs_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, AppError> {
    let blogs = state
        .blogs
        .find(doc! {})
        .sort(doc! { "_id": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(blogs))
}

pub async fn create_blog_handler(
    State(state): State<Arc<AppState>>,
    Json(blog): Json<Document>,
) -> Result<Json<InsertAck>, AppError> {
    let result = state.blogs.insert_one(blog).await?;

    Ok(Json(result.into()))
}

pub async fn get_blog_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, AppError> {
    let oid = parse_object_id(&id)?;

    // Missing blog serializes as null, same status as a hit.
    let blog = state.blogs.find_one(doc! { "_id": oid }).await?;

    Ok(Json(blog))
}

pub async fn featured_blogs_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, AppError> {
    let blogs = state
        .blogs
        .find(doc! {})
        .sort(doc! { "_id": -1 })
        .limit(FEATURED_LIMIT)
        .await?
        .try_collect()
        .await?;

    Ok(Json(blogs))
}

pub async fn list_wishlist_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WishlistQuery>,
) -> Result<Json<Vec<Wish>>, AppError> {
    let wishes = state
        .wishlist
        .find(doc! { "email": &query.email })
        .sort(doc! { "_id": -1 })
        .await?
        .try_collect()
        .await?;

    Ok(Json(wishes))
}

/// Inserts unconditionally and lets the unique (`blogId`, `email`) index
/// reject duplicates, so two racing requests cannot both succeed.
pub async fn create_wish_handler(
    State(state): State<Arc<AppState>>,
    Json(wish): Json<Wish>,
) -> Result<Json<InsertAck>, AppError> {
    match state.wishlist.insert_one(wish).await {
        Ok(result) => Ok(Json(result.into())),
        Err(err) if is_duplicate_key_error(&err) => Err(AppError::AlreadyInWishlist),
        Err(err) => Err(err.into()),
    }
}

pub async fn delete_wish_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let oid = parse_object_id(&id)?;

    // Deleting an id that is already gone acks with deletedCount 0.
    let result = state.wishlist.delete_one(doc! { "_id": oid }).await?;

    Ok(Json(result.into()))
}

pub async fn create_comment_handler(
    State(state): State<Arc<AppState>>,
    Json(comment): Json<Document>,
) -> Result<Json<InsertAck>, AppError> {
    let result = state.comments.insert_one(comment).await?;

    Ok(Json(result.into()))
}

pub async fn list_comments_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>, AppError> {
    let comments = state.comments.find(doc! {}).await?.try_collect().await?;

    Ok(Json(comments))
}
