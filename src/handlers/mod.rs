// handlers/mod.rs - Handler tiers
//
// Public (no auth) → Protected (bearer token) → Elevated (bearer token + privileged identity)
//
// Authentication and privilege checks live in middleware::auth and are applied
// per tier in routes.rs; handlers only see an already-resolved `User`.
pub mod elevated;
pub mod protected;
pub mod public;
