//! Relational persistence via SeaORM.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{PostgresOrderService, PostgresUserRepository};

#[cfg(test)]
mod tests;
