// handlers/public/auth/mod.rs - Account creation and sign-in
//
// Both handlers forward to the identity provider. Registration surfaces the
// provider's error message; login replaces it with a fixed one so callers
// cannot tell which credential was wrong.
pub mod login;
pub mod register;

pub use login::login_post;
pub use register::register_post;
