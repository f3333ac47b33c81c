use actix_web::{web, HttpResponse};
use crate::{
    database::DocumentStore,
    models::{AddedUserQuery, AddedUserUpdate, NewAddedUser},
    services::added_user_service,
    utils::{
        json::{document_to_json, documents_to_json},
        AppResult,
    },
};

/// POST /addedUsers - Stores a submitted entry stamped with `createdAt`
#[utoipa::path(
    post,
    path = "/addedUsers",
    tag = "Added Users",
    responses(
        (status = 200, description = "Insert result"),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn create_added_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<NewAddedUser>,
) -> AppResult<HttpResponse> {
    log::info!("📝 POST /addedUsers");

    let outcome = added_user_service::create_added_user(store.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    get,
    path = "/addedUsers",
    tag = "Added Users",
    params(AddedUserQuery),
    responses(
        (status = 200, description = "Matching entries in store order")
    )
)]
pub async fn list_added_users(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<AddedUserQuery>,
) -> AppResult<HttpResponse> {
    log::info!("📋 GET /addedUsers - filter: {:?}", query);

    let entries = added_user_service::list_added_users(store.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(entries)))
}

#[utoipa::path(
    get,
    path = "/addedUsers/{id}",
    tag = "Added Users",
    params(("id" = String, Path, description = "ObjectId hex or raw string id")),
    responses(
        (status = 200, description = "The entry"),
        (status = 404, description = "No entry under either id form"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn get_added_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("🔎 GET /addedUsers/{}", id);

    let entry = added_user_service::find_added_user(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(document_to_json(entry)))
}

/// PUT /addedUsers/{id} - Upsert of `photo`/`body`/`type`
#[utoipa::path(
    put,
    path = "/addedUsers/{id}",
    tag = "Added Users",
    params(("id" = String, Path, description = "Store identifier")),
    request_body = AddedUserUpdate,
    responses(
        (status = 200, description = "Update result; `upsertedId` is set when a record was created")
    )
)]
pub async fn upsert_added_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<AddedUserUpdate>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("✏️ PUT /addedUsers/{}", id);

    let outcome = added_user_service::upsert_added_user(store.get_ref(), &id, &body).await?;
    if outcome.upserted_count > 0 {
        log::info!("✅ Created entry {}", id);
    }

    Ok(HttpResponse::Ok().json(outcome))
}

#[utoipa::path(
    delete,
    path = "/addedUsers/{id}",
    tag = "Added Users",
    params(("id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Delete result, `deletedCount` may be 0")
    )
)]
pub async fn delete_added_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /addedUsers/{}", id);

    let outcome = added_user_service::delete_added_user(store.get_ref(), &id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
