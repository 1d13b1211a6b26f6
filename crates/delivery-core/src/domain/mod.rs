//! Domain entities - the core business objects.

mod order;
mod user;

pub use order::{Order, OrderCreate, OrderStatus};
pub use user::{Gender, LoginCredentials, NewUser, User, UserEdit, mask_email, normalize_email};
