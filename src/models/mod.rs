pub mod chamado;
pub mod user;

pub use chamado::{Chamado, NewChamado};
pub use user::{AuthResponse, User};
