//! Order service port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Order, OrderCreate};
use crate::error::DomainError;

/// Order operations performed on behalf of an authenticated user.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order attributed to `email`.
    async fn create_order(&self, payload: OrderCreate, email: &str)
    -> Result<Order, DomainError>;

    /// Mark an order delivered. Only the order's owner may confirm it.
    async fn confirm_delivery(&self, order_id: Uuid, email: &str) -> Result<(), DomainError>;
}
