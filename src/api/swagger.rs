use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mindful Gurukul API",
        version = "1.0.0",
        description = "REST access to the `users` and `addedUsers` collections.\n\n**Authentication:** `POST /jwt` issues a 7-day bearer token; only the role-check endpoint requires it unless admin routes are enforced."
    ),
    paths(
        // Health
        crate::api::health::liveness,
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,

        // Users
        crate::api::users::list_users,
        crate::api::users::check_role,
        crate::api::users::update_role,
        crate::api::users::create_user,
        crate::api::users::delete_user,

        // Added users
        crate::api::added_users::create_added_user,
        crate::api::added_users::list_added_users,
        crate::api::added_users::get_added_user,
        crate::api::added_users::upsert_added_user,
        crate::api::added_users::delete_added_user,
    ),
    components(
        schemas(
            crate::api::auth::TokenResponse,
            crate::api::health::HealthResponse,
            crate::models::RoleUpdate,
            crate::models::MessageResponse,
            crate::models::AddedUserUpdate,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and store reachability."),
        (name = "Auth", description = "Token issuance."),
        (name = "Users", description = "User directory: listing, registration, role checks and updates."),
        (name = "Added Users", description = "Submitted entries with server-stamped creation time."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build()
                ),
            );
        }
    }
}
