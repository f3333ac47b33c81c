pub mod added_user;
pub mod filter;
pub mod record_id;
pub mod user;

pub use added_user::*;
pub use filter::*;
pub use record_id::*;
pub use user::*;
