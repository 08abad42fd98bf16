// handlers/protected/mod.rs - Handlers behind middleware::auth::require_identity
//
// Every handler here receives the caller as `Extension<User>` and scopes its
// store operation to that user's id.
pub mod chamados;

pub use chamados::{create_post, delete as delete_chamado, list_get};
