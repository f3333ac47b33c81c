// In-process DocumentStore for tests.

use super::{DeleteOutcome, DocumentStore, InsertOutcome, UpdateOutcome};
use crate::utils::{AppError, AppResult};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the server were unreachable.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn all(&self, collection: &str) -> Vec<Document> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Database("server selection timeout".to_string()));
        }
        Ok(())
    }
}

fn unescape(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn matches(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match expected {
        Bson::Document(op) if op.contains_key("$regex") => {
            let needle = unescape(op.get_str("$regex").unwrap_or_default());
            let insensitive = op.get_str("$options").unwrap_or_default().contains('i');
            match doc.get(key) {
                Some(Bson::String(value)) if insensitive => {
                    value.to_lowercase().contains(&needle.to_lowercase())
                }
                Some(Bson::String(value)) => value.contains(&needle),
                _ => false,
            }
        }
        _ => doc.get(key) == Some(expected),
    })
}

fn apply_set(doc: &mut Document, update: &Document) -> bool {
    let mut changed = false;
    if let Ok(set) = update.get_document("$set") {
        for (key, value) in set {
            if doc.get(key) != Some(value) {
                doc.insert(key.clone(), value.clone());
                changed = true;
            }
        }
    }
    changed
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> AppResult<Vec<Document>> {
        self.check()?;
        Ok(self
            .all(collection)
            .await
            .into_iter()
            .filter(|doc| matches(doc, &filter))
            .collect())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> AppResult<Option<Document>> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> AppResult<InsertOutcome> {
        self.check()?;
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> AppResult<UpdateOutcome> {
        self.check()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(doc) = docs.iter_mut().find(|doc| matches(doc, &filter)) {
            let changed = apply_set(doc, &update);
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(changed),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        if !upsert {
            return Ok(UpdateOutcome {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }

        // Upserted documents start from the equality part of the filter.
        let mut created: Document = filter
            .into_iter()
            .filter(|(_, v)| !matches!(v, Bson::Document(_)))
            .collect();
        apply_set(&mut created, &update);
        let id = match created.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                created.insert("_id", id.clone());
                id
            }
        };
        docs.push(created);

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> AppResult<DeleteOutcome> {
        self.check()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let deleted_count = match docs.iter().position(|doc| matches(doc, &filter)) {
            Some(index) => {
                docs.remove(index);
                1
            }
            None => 0,
        };
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}
