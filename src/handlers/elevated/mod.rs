// handlers/elevated/mod.rs - Handlers behind require_identity + require_privileged
pub mod chamados;

pub use chamados::list_all_get;
