// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account creation and token acquisition, plus the liveness routes.
pub mod auth;
pub mod status;

pub use auth::{login_post, register_post};
pub use status::{health, root};
