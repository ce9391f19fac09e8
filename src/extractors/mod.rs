//! Request extractors.

pub mod auth;
pub mod json;
pub use auth::{AdminUser, CurrentUser, AUTHORIZATION_HEADER};
pub use json::JsonObject;
