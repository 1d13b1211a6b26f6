//! Application services - orchestration over the ports.

mod identity;

pub use identity::{IdentityService, TokenDto};
