use crate::utils::{
    json::{serialize_bson, serialize_opt_bson},
    AppResult,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use serde::Serialize;

#[cfg(test)]
pub mod memory;

pub const USERS: &str = "users";
pub const ADDED_USERS: &str = "addedUsers";

// ==================== RESULT DESCRIPTORS ====================
// Same shape the MongoDB drivers report, so clients can read them as-is.

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_bson")]
    pub inserted_id: Bson,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(serialize_with = "serialize_opt_bson")]
    pub upserted_id: Option<Bson>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Persistence of JSON-like records in named collections.
///
/// Filters use MongoDB query syntax restricted to field equality and
/// `{"$regex": .., "$options": "i"}`; updates use `$set`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, filter: Document) -> AppResult<Vec<Document>>;

    async fn find_one(&self, collection: &str, filter: Document) -> AppResult<Option<Document>>;

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<InsertOutcome>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> AppResult<UpdateOutcome>;

    async fn delete_one(&self, collection: &str, filter: Document) -> AppResult<DeleteOutcome>;

    /// Round trip to the server, used at startup and by `/health`.
    async fn ping(&self) -> AppResult<()>;
}

// ==================== MONGODB ====================

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> AppResult<Self> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("gurukul-server".to_string());
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };
        mongodb.ping().await?;

        Ok(mongodb)
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    /// Closes pooled connections. Called once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(&self, collection: &str, filter: Document) -> AppResult<Vec<Document>> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> AppResult<Option<Document>> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> AppResult<InsertOutcome> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: result.inserted_id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> AppResult<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_one(filter, update)
            .upsert(upsert)
            .await?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(result.upserted_id.is_some()),
            upserted_id: result.upserted_id,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> AppResult<DeleteOutcome> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_serialize_like_driver() {
        let oid = mongodb::bson::oid::ObjectId::new();
        let insert = serde_json::to_value(InsertOutcome {
            acknowledged: true,
            inserted_id: Bson::ObjectId(oid),
        })
        .unwrap();
        assert_eq!(insert["insertedId"], oid.to_hex());

        let update = serde_json::to_value(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        })
        .unwrap();
        assert_eq!(update["matchedCount"], 0);
        assert!(update["upsertedId"].is_null());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, "gurukulDB_test").await;
        assert!(db.is_ok());
    }
}
