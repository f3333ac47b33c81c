// ==================== ADDED USERS ====================
// Submitted entries in the `addedUsers` collection.

use crate::{
    database::{DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome, ADDED_USERS},
    models::{contains_filter, AddedUserQuery, AddedUserUpdate, NewAddedUser, RecordId, CREATED_AT},
    utils::{AppError, AppResult},
};
use mongodb::bson::{doc, oid::ObjectId, to_document, Bson, DateTime, Document};

pub async fn create_added_user(
    store: &dyn DocumentStore,
    entry: NewAddedUser,
) -> AppResult<InsertOutcome> {
    let mut document = to_document(&entry.fields)?;
    document.insert(CREATED_AT, DateTime::now());
    store.insert_one(ADDED_USERS, document).await
}

pub async fn list_added_users(
    store: &dyn DocumentStore,
    query: &AddedUserQuery,
) -> AppResult<Vec<Document>> {
    let filter = contains_filter([
        ("email", query.email.as_deref()),
        ("name", query.name.as_deref()),
    ]);
    store.find(ADDED_USERS, filter).await
}

/// Looks `id` up as an ObjectId first, then as a raw string key.
pub async fn find_added_user(store: &dyn DocumentStore, id: &str) -> AppResult<Document> {
    if let Ok(oid) = ObjectId::parse_str(id) {
        if let Some(found) = store.find_one(ADDED_USERS, doc! { "_id": oid }).await? {
            return Ok(found);
        }
    }

    store
        .find_one(ADDED_USERS, doc! { "_id": id })
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))
}

/// Sets `photo`, `body` and `type` from `name`, `email` and `phone`,
/// inserting a new record when nothing matches.
pub async fn upsert_added_user(
    store: &dyn DocumentStore,
    id: &str,
    update: &AddedUserUpdate,
) -> AppResult<UpdateOutcome> {
    let id: Bson = RecordId::parse(id).into();
    let as_bson = |v: &Option<String>| v.clone().map(Bson::String).unwrap_or(Bson::Null);

    store
        .update_one(
            ADDED_USERS,
            doc! { "_id": id },
            doc! {
                "$set": {
                    "photo": as_bson(&update.name),
                    "body": as_bson(&update.email),
                    "type": as_bson(&update.phone),
                }
            },
            true,
        )
        .await
}

pub async fn delete_added_user(store: &dyn DocumentStore, id: &str) -> AppResult<DeleteOutcome> {
    let id: Bson = RecordId::parse(id).into();
    store.delete_one(ADDED_USERS, doc! { "_id": id }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use serde_json::json;

    fn entry(value: serde_json::Value) -> NewAddedUser {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_created_at_is_stamped_by_server() {
        let store = MemoryStore::new();
        let before = DateTime::now();
        create_added_user(
            &store,
            entry(json!({ "email": "e@x.com", "createdAt": "1999-01-01" })),
        )
        .await
        .unwrap();

        let stored = store.all(ADDED_USERS).await;
        let created = stored[0].get_datetime(CREATED_AT).unwrap();
        assert!(created.timestamp_millis() >= before.timestamp_millis());
    }

    #[tokio::test]
    async fn test_find_falls_back_to_raw_string_id() {
        let store = MemoryStore::new();
        store
            .insert_one(ADDED_USERS, doc! { "_id": "legacy-7", "name": "Old" })
            .await
            .unwrap();

        let found = find_added_user(&store, "legacy-7").await.unwrap();
        assert_eq!(found.get_str("name").unwrap(), "Old");
    }

    #[tokio::test]
    async fn test_find_retries_hex_id_as_string() {
        let store = MemoryStore::new();
        let id = "64b7f0c2a1b2c3d4e5f60718";
        store
            .insert_one(ADDED_USERS, doc! { "_id": id, "name": "Imported" })
            .await
            .unwrap();

        let found = find_added_user(&store, id).await.unwrap();
        assert_eq!(found.get_str("_id").unwrap(), id);
        assert_eq!(found.get_str("name").unwrap(), "Imported");
    }

    #[tokio::test]
    async fn test_find_by_object_id() {
        let store = MemoryStore::new();
        let outcome = create_added_user(&store, entry(json!({ "name": "New" })))
            .await
            .unwrap();
        let hex = outcome.inserted_id.as_object_id().unwrap().to_hex();

        let found = find_added_user(&store, &hex).await.unwrap();
        assert_eq!(found.get_str("name").unwrap(), "New");
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = find_added_user(&store, "64b7f0c2a1b2c3d4e5f60718").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_upsert_creates_with_mapped_fields() {
        let store = MemoryStore::new();
        let id = "64b7f0c2a1b2c3d4e5f60718";
        let update = AddedUserUpdate {
            name: Some("n".into()),
            email: Some("e".into()),
            phone: Some("p".into()),
        };

        let outcome = upsert_added_user(&store, id, &update).await.unwrap();
        assert_eq!(outcome.upserted_count, 1);

        let stored = find_added_user(&store, id).await.unwrap();
        assert_eq!(stored.get_str("photo").unwrap(), "n");
        assert_eq!(stored.get_str("body").unwrap(), "e");
        assert_eq!(stored.get_str("type").unwrap(), "p");
    }

    #[tokio::test]
    async fn test_upsert_updates_existing() {
        let store = MemoryStore::new();
        let outcome = create_added_user(&store, entry(json!({ "name": "A" })))
            .await
            .unwrap();
        let hex = outcome.inserted_id.as_object_id().unwrap().to_hex();

        let update = AddedUserUpdate {
            name: Some("pic.png".into()),
            ..Default::default()
        };
        let outcome = upsert_added_user(&store, &hex, &update).await.unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(store.all(ADDED_USERS).await.len(), 1);

        let stored = find_added_user(&store, &hex).await.unwrap();
        assert_eq!(stored.get_str("photo").unwrap(), "pic.png");
        assert_eq!(stored.get("type"), Some(&Bson::Null));
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let outcome = create_added_user(&store, entry(json!({ "name": "A" })))
            .await
            .unwrap();
        let hex = outcome.inserted_id.as_object_id().unwrap().to_hex();

        assert_eq!(delete_added_user(&store, &hex).await.unwrap().deleted_count, 1);
        assert_eq!(delete_added_user(&store, &hex).await.unwrap().deleted_count, 0);
    }
}
