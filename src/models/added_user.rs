use serde::Deserialize;
use serde_json::{Map, Value};

/// Set by the server on insert; never taken from the request.
pub const CREATED_AT: &str = "createdAt";

/// Body of `POST /addedUsers`. Loosely typed: everything sent is stored.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct NewAddedUser {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of `PUT /addedUsers/{id}`.
///
/// Stored as `photo` ← `name`, `body` ← `email`, `type` ← `phone`.
/// Missing fields are written as null.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct AddedUserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Query of `GET /addedUsers`
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddedUserQuery {
    /// Case-insensitive substring of the email
    pub email: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
}
