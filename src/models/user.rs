use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Only this role value grants privileged access.
pub const ADMIN_ROLE: &str = "admin";

/// Body of `POST /users`. Any field beyond `email` is stored as sent.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewUser {
    pub email: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of `PATCH /users/{email}`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RoleUpdate {
    pub role: String,
}

/// Query of `GET /users`
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Case-insensitive substring of the email
    pub email: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the role
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
