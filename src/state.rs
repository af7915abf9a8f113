use std::sync::Arc;

use mongodb::{Collection, Database, bson::Document};

use super::{
    config::Config,
    database::{BLOGS, COMMENTS, WISHLIST, ensure_indexes, init_mongo},
    models::Wish,
};

/// Shared handles for every request: the loaded config plus one typed
/// collection handle per resource, all backed by a single pooled client.
pub struct AppState {
    pub config: Config,
    pub blogs: Collection<Document>,
    pub comments: Collection<Document>,
    pub wishlist: Collection<Wish>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let db = init_mongo(&config.connection_uri()).await;
        ensure_indexes(&db)
            .await
            .expect("Failed to build wishlist index");

        Self::from_database(config, db)
    }

    /// Wires the state to an already-opened database. Production goes
    /// through [`AppState::new`]; tests inject their own handle here.
    pub fn from_database(config: Config, db: Database) -> Arc<Self> {
        Arc::new(Self {
            blogs: db.collection(BLOGS),
            comments: db.collection(COMMENTS),
            wishlist: db.collection(WISHLIST),
            config,
        })
    }
}
