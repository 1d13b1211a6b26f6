//! In-memory order service.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use delivery_core::DomainError;
use delivery_core::domain::{Order, OrderCreate};
use delivery_core::ports::OrderService;

/// Order service keeping orders in process memory.
pub struct InMemoryOrderService {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl InMemoryOrderService {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a stored order.
    pub async fn get(&self, order_id: Uuid) -> Option<Order> {
        self.orders.read().await.get(&order_id).cloned()
    }
}

impl Default for InMemoryOrderService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderService for InMemoryOrderService {
    async fn create_order(
        &self,
        payload: OrderCreate,
        email: &str,
    ) -> Result<Order, DomainError> {
        let order = Order::place(payload, email.to_string(), Utc::now())?;

        self.orders.write().await.insert(order.id, order.clone());
        tracing::info!(order_id = %order.id, "Order created");

        Ok(order)
    }

    async fn confirm_delivery(&self, order_id: Uuid, email: &str) -> Result<(), DomainError> {
        let mut orders = self.orders.write().await;

        let order = orders.get_mut(&order_id).ok_or(DomainError::NotFound {
            entity_type: "Order",
            id: order_id,
        })?;
        order.confirm_delivery_by(email)?;

        tracing::info!(%order_id, "Order delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use delivery_core::domain::OrderStatus;

    use super::*;

    fn payload() -> OrderCreate {
        OrderCreate {
            delivery_time: Utc::now() + TimeDelta::hours(2),
            address: "221B Baker St".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_confirm() {
        let service = InMemoryOrderService::new();

        let order = service.create_order(payload(), "holmes@example.com").await.unwrap();
        service
            .confirm_delivery(order.id, "holmes@example.com")
            .await
            .unwrap();

        let stored = service.get(order.id).await.unwrap();
        assert_eq!(stored.status, OrderStatus::Delivered);
        assert_eq!(stored.user_email, "holmes@example.com");
    }

    #[tokio::test]
    async fn test_confirm_by_other_email_is_forbidden() {
        let service = InMemoryOrderService::new();
        let order = service.create_order(payload(), "holmes@example.com").await.unwrap();

        let err = service
            .confirm_delivery(order.id, "moriarty@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Forbidden));
        assert_eq!(
            service.get(order.id).await.unwrap().status,
            OrderStatus::InProcess
        );
    }

    #[tokio::test]
    async fn test_confirm_unknown_order() {
        let service = InMemoryOrderService::new();

        let err = service
            .confirm_delivery(Uuid::new_v4(), "holmes@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
