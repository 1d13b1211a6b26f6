use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    InProcess,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::InProcess => "InProcess",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InProcess" => Ok(OrderStatus::InProcess),
            "Delivered" => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

/// Order entity - a delivery placed by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_email: String,
    pub delivery_time: DateTime<Utc>,
    pub order_time: DateTime<Utc>,
    pub address: String,
    pub status: OrderStatus,
}

impl Order {
    /// Create an in-process order placed at `now`.
    ///
    /// The delivery time may not lie in the past.
    pub fn place(
        payload: OrderCreate,
        user_email: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if payload.delivery_time < now {
            return Err(DomainError::Validation(
                "Delivery time cannot be in the past".to_string(),
            ));
        }
        if payload.address.trim().is_empty() {
            return Err(DomainError::Validation("Address is required".to_string()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_email,
            delivery_time: payload.delivery_time,
            order_time: now,
            address: payload.address,
            status: OrderStatus::InProcess,
        })
    }

    /// Mark the order delivered on behalf of `email`. Confirming twice is a no-op.
    pub fn confirm_delivery_by(&mut self, email: &str) -> Result<(), DomainError> {
        if self.user_email != email {
            return Err(DomainError::Forbidden);
        }
        self.status = OrderStatus::Delivered;
        Ok(())
    }
}

/// Order creation payload.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub delivery_time: DateTime<Utc>,
    pub address: String,
}
