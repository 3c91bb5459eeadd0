use mongodb::{Client, Collection, Database};
use shared::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

use self::model::book::BookDocument;

pub mod model;

// ドライバが Client の内側でコネクションプールを持つので、clone しても安価
#[derive(Clone)]
pub struct ConnectionPool {
    db: Database,
    collection: String,
}

impl ConnectionPool {
    pub fn new(db: Database, collection: String) -> Self {
        Self { db, collection }
    }

    pub fn inner_ref(&self) -> &Database {
        &self.db
    }

    pub fn books(&self) -> Collection<BookDocument> {
        self.db.collection(&self.collection)
    }
}

pub async fn connect_database_with(cfg: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let client = Client::with_uri_str(&cfg.uri)
        .await
        .map_err(AppError::StoreError)?;
    Ok(ConnectionPool::new(
        client.database(&cfg.database),
        cfg.collection.clone(),
    ))
}
