// Utility functions
pub mod error;
pub mod json;

pub use error::*;
