use crate::utils::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Tokens are valid for seven days from issuance; there is no refresh.
pub const TOKEN_TTL_DAYS: i64 = 7;

// JWT Claims: whatever the caller signed, plus the time window
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub iat: i64,              // issued at
    pub exp: i64,              // expiration
}

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }
}

/// Issues and verifies HS256 tokens signed with the server secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    pub fn issue(&self, payload: Value) -> AppResult<String> {
        self.issue_at(payload, Utc::now())
    }

    fn issue_at(&self, payload: Value, issued_at: DateTime<Utc>) -> AppResult<String> {
        let mut payload = match payload {
            Value::Object(map) => map,
            _ => {
                return Err(AppError::InvalidRequest(
                    "token payload must be a JSON object".to_string(),
                ))
            }
        };
        payload.remove("iat");
        payload.remove("exp");

        let claims = Claims {
            payload,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Token(format!("Failed to generate token: {}", e)))
    }

    /// Fails with `Unauthenticated` for malformed, expired or foreign-signed tokens.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Token rejected: {}", e);
                AppError::Unauthenticated
            })
    }
}
