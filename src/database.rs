//! # MongoDB
//!
//! Document store holding all persisted state. Three collections:
//!
//! - `blogs`: opaque documents, listed newest first by `_id`
//! - `comments`: opaque documents, listed unordered
//! - `wishlist`: one entry per (`blogId`, `email`), enforced by a unique
//!   compound index created at startup
//!
//! The client connects lazily, so constructing one never touches the
//! network; the index build in [`ensure_indexes`] is the first real I/O.
use mongodb::{
    Client, Database, IndexModel,
    bson::doc,
    error::{Error, ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::info;

use crate::models::Wish;

pub const DB_NAME: &str = "readly";

pub const BLOGS: &str = "blogs";
pub const COMMENTS: &str = "comments";
pub const WISHLIST: &str = "wishlist";

const DUPLICATE_KEY_CODE: i32 = 11000;

pub async fn init_mongo(uri: &str) -> Database {
    let client = Client::with_uri_str(uri)
        .await
        .expect("Invalid MongoDB connection string");

    client.database(DB_NAME)
}

/// Builds the unique (`blogId`, `email`) index on the wishlist collection.
/// Idempotent, so safe to run on every startup.
pub async fn ensure_indexes(db: &Database) -> mongodb::error::Result<()> {
    let index = IndexModel::builder()
        .keys(doc! { "blogId": 1, "email": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build();

    let result = db.collection::<Wish>(WISHLIST).create_index(index).await?;
    info!("Wishlist index ready: {}", result.index_name);

    Ok(())
}

/// True when a write was rejected by a unique index. Duplicate wishlist
/// inserts surface this way instead of a pre-insert lookup.
pub fn is_duplicate_key_error(err: &Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
