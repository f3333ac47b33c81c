// ==================== USER DIRECTORY ====================
// Pass-through operations over the `users` collection.

use crate::{
    database::{DeleteOutcome, DocumentStore, InsertOutcome, USERS},
    models::{contains_filter, NewUser, RecordId, UserQuery, ADMIN_ROLE},
    utils::{AppError, AppResult},
};
use mongodb::bson::{doc, to_document, Bson, Document};

pub enum CreateUserResult {
    Created(InsertOutcome),
    AlreadyExists,
}

pub async fn list_users(store: &dyn DocumentStore, query: &UserQuery) -> AppResult<Vec<Document>> {
    let filter = contains_filter([
        ("email", query.email.as_deref()),
        ("name", query.name.as_deref()),
        ("role", query.role.as_deref()),
    ]);
    store.find(USERS, filter).await
}

pub async fn find_by_email(store: &dyn DocumentStore, email: &str) -> AppResult<Option<Document>> {
    store.find_one(USERS, doc! { "email": email }).await
}

/// Whether the stored user with `email` has exactly `role`.
pub async fn has_role(store: &dyn DocumentStore, email: &str, role: &str) -> AppResult<bool> {
    let user = find_by_email(store, email).await?;
    Ok(user.is_some_and(|u| u.get_str("role").is_ok_and(|r| r == role)))
}

/// `Forbidden` unless the user exists and its role is exactly `"admin"`.
pub async fn require_admin(store: &dyn DocumentStore, email: &str) -> AppResult<()> {
    if has_role(store, email, ADMIN_ROLE).await? {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Matching nothing is not an error.
pub async fn update_role(store: &dyn DocumentStore, email: &str, role: &str) -> AppResult<()> {
    let outcome = store
        .update_one(
            USERS,
            doc! { "email": email },
            doc! { "$set": { "role": role } },
            false,
        )
        .await?;
    log::debug!("Role update for {} matched {}", email, outcome.matched_count);
    Ok(())
}

/// Inserts the user unless one with the same email is already stored.
///
/// The existence check and the insert are separate calls; two concurrent
/// registrations for one email can both succeed.
pub async fn create_user(store: &dyn DocumentStore, user: NewUser) -> AppResult<CreateUserResult> {
    if find_by_email(store, &user.email).await?.is_some() {
        return Ok(CreateUserResult::AlreadyExists);
    }

    let mut document = doc! { "email": user.email.as_str() };
    for (key, value) in to_document(&user.fields)? {
        if key != "email" {
            document.insert(key, value);
        }
    }

    let outcome = store.insert_one(USERS, document).await?;
    Ok(CreateUserResult::Created(outcome))
}

pub async fn delete_user(store: &dyn DocumentStore, id: &str) -> AppResult<DeleteOutcome> {
    let id: Bson = RecordId::parse(id).into();
    store.delete_one(USERS, doc! { "_id": id }).await
}
