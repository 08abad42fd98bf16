pub mod auth;
pub mod json;

pub use auth::{require_identity, require_privileged, resolve_identity};
pub use json::JsonBody;
