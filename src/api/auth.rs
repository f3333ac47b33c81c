use actix_web::{web, HttpResponse};
use crate::{services::token_service::TokenService, utils::AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /jwt - Signs the posted object into a 7-day token
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed token", body = TokenResponse),
        (status = 400, description = "Body is not a JSON object")
    )
)]
pub async fn issue_token(
    tokens: web::Data<TokenService>,
    payload: web::Json<serde_json::Value>,
) -> AppResult<HttpResponse> {
    log::info!(
        "🔐 POST /jwt - email: {}",
        payload.get("email").and_then(|e| e.as_str()).unwrap_or("N/A")
    );

    let token = tokens.issue(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
