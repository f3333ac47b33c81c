pub mod admin;
pub mod auth;

pub use admin::AdminGuard;
pub use auth::AuthMiddleware;
