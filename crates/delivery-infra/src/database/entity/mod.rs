//! SeaORM entities.

pub mod order;
pub mod user;
