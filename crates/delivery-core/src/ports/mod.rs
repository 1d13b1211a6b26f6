//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod orders;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use orders::OrderService;
pub use repository::UserRepository;
