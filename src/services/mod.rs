pub mod added_user_service;
pub mod token_service;
pub mod user_service;
