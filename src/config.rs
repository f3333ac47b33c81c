use crate::utils::{AppError, AppResult};
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 2500;
const DEFAULT_DATABASE: &str = "gurukulDB";

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database_name: String,
    pub token_secret: String,
    /// Gate role updates and user deletion behind auth + admin guard.
    pub enforce_admin_routes: bool,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let mongo_uri = non_empty("MONGO_URI")
            .or_else(|| non_empty("Mongo_URI"))
            .ok_or_else(|| AppError::Config("MONGO_URI must be set".to_string()))?;

        let token_secret = non_empty("ACCESS_TOKEN_SECRET")
            .ok_or_else(|| AppError::Config("ACCESS_TOKEN_SECRET must be set".to_string()))?;

        let enforce_admin_routes = non_empty("ENFORCE_ADMIN_ROUTES")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            mongo_uri,
            database_name: non_empty("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            token_secret,
            enforce_admin_routes,
        })
    }
}
