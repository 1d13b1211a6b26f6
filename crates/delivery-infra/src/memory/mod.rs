//! In-memory adapters - used when no database is configured, and in tests.

mod orders;
mod users;

pub use orders::InMemoryOrderService;
pub use users::InMemoryUserRepository;
