pub mod added_users;
pub mod auth;
pub mod health;
pub mod swagger;
pub mod users;


use crate::middleware::{AdminGuard, AuthMiddleware};
use crate::utils::AppError;
use actix_web::{middleware::Condition, web};

/// Registers every route.
///
/// With `enforce_admin_routes`, role updates and user deletion require a
/// token whose email belongs to an admin.
pub fn configure(cfg: &mut web::ServiceConfig, enforce_admin_routes: bool) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into()),
    )
    // Health
    .route("/", web::get().to(health::liveness))
    .route("/health", web::get().to(health::health_check))
    // Auth
    .route("/jwt", web::post().to(auth::issue_token))
    // Users
    .service(
        web::resource("/users")
            .route(web::get().to(users::list_users))
            .route(web::post().to(users::create_user)),
    )
    .service(
        web::resource("/users/{role}/{email}")
            .wrap(AuthMiddleware)
            .route(web::get().to(users::check_role)),
    )
    // `{key}` is an email for PATCH and a store id for DELETE
    .service(
        web::resource("/users/{key}")
            .wrap(Condition::new(enforce_admin_routes, AdminGuard))
            .wrap(Condition::new(enforce_admin_routes, AuthMiddleware))
            .route(web::patch().to(users::update_role))
            .route(web::delete().to(users::delete_user)),
    )
    // Added users
    .service(
        web::resource("/addedUsers")
            .route(web::get().to(added_users::list_added_users))
            .route(web::post().to(added_users::create_added_user)),
    )
    .service(
        web::resource("/addedUsers/{id}")
            .route(web::get().to(added_users::get_added_user))
            .route(web::put().to(added_users::upsert_added_user))
            .route(web::delete().to(added_users::delete_added_user)),
    );
}
