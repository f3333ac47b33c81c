use actix_web::{web, HttpResponse};
use crate::{
    database::DocumentStore,
    middleware::auth::Claims,
    models::{MessageResponse, NewUser, RoleUpdate, UserQuery},
    services::user_service::{self, CreateUserResult},
    utils::{json::documents_to_json, AppResult},
};

/// GET /users - Lists users, optionally filtered by email/name/role substrings
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(UserQuery),
    responses(
        (status = 200, description = "Matching users in store order"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list_users(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<UserQuery>,
) -> AppResult<HttpResponse> {
    log::info!("📋 GET /users - filter: {:?}", query);

    let users = user_service::list_users(store.get_ref(), &query).await?;
    log::info!("✅ Listed {} users", users.len());

    Ok(HttpResponse::Ok().json(documents_to_json(users)))
}

/// GET /users/{role}/{email} - Whether the caller holds `role`
///
/// Asking about anyone but yourself always answers false.
#[utoipa::path(
    get,
    path = "/users/{role}/{email}",
    tag = "Users",
    params(
        ("role" = String, Path, description = "Role to test for"),
        ("email" = String, Path, description = "Email of the authenticated caller")
    ),
    responses(
        (status = 200, description = "`{<role>: bool}`"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn check_role(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (role, email) = path.into_inner();
    log::info!("🔎 GET /users/{}/{}", role, email);

    let has_role = if user.email() == Some(email.as_str()) {
        user_service::has_role(store.get_ref(), &email, &role).await?
    } else {
        false
    };

    let mut body = serde_json::Map::new();
    body.insert(role, serde_json::Value::Bool(has_role));
    Ok(HttpResponse::Ok().json(body))
}

/// PATCH /users/{email} - Sets the role of a user
#[utoipa::path(
    patch,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    request_body = RoleUpdate,
    responses(
        (status = 200, description = "Role updated (also when no user matched)", body = MessageResponse),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update_role(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<RoleUpdate>,
) -> AppResult<HttpResponse> {
    let email = path.into_inner();
    log::info!("✏️ PATCH /users/{} - role: {}", email, body.role);

    user_service::update_role(store.get_ref(), &email, &body.role).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User role updated successfully")))
}

/// POST /users - Registers a user unless the email is already taken
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Insert result, or `{message}` when the email exists"),
        (status = 400, description = "Body is not an object with an email")
    )
)]
pub async fn create_user(
    store: web::Data<dyn DocumentStore>,
    body: web::Json<NewUser>,
) -> AppResult<HttpResponse> {
    let user = body.into_inner();
    let email = user.email.clone();
    log::info!("📝 POST /users - email: {}", email);

    match user_service::create_user(store.get_ref(), user).await? {
        CreateUserResult::Created(outcome) => {
            log::info!("✅ User registered: {}", email);
            Ok(HttpResponse::Ok().json(outcome))
        }
        CreateUserResult::AlreadyExists => {
            log::info!("ℹ️ User already exists: {}", email);
            Ok(HttpResponse::Ok().json(MessageResponse::new("user already exists")))
        }
    }
}

/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Delete result, `deletedCount` may be 0"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_user(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /users/{}", id);

    let outcome = user_service::delete_user(store.get_ref(), &id).await?;
    log::info!("✅ Deleted {} user(s) for id {}", outcome.deleted_count, id);

    Ok(HttpResponse::Ok().json(outcome))
}
