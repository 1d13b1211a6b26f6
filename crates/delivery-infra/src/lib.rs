//! # Delivery Infrastructure
//!
//! Concrete implementations of the ports defined in `delivery-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `postgres` - PostgreSQL persistence via SeaORM

pub mod auth;
pub mod memory;

#[cfg(feature = "postgres")]
pub mod database;

pub use auth::{
    Argon2PasswordService, JwtConfig, JwtTokenService, PasswordStorage, PlaintextPasswordService,
};
pub use memory::{InMemoryOrderService, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections, PostgresOrderService, PostgresUserRepository};
