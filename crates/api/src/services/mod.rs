//! Cross-cutting flows that compose the repository and the provider gateway.

pub mod admin_sessions;
pub mod rental;
