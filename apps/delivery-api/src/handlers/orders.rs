//! Order handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use delivery_core::domain::{Order, OrderCreate, OrderStatus};
use delivery_shared::dto::{OrderCreateRequest, OrderResponse, OrderStatusDto};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn order_response(order: Order) -> OrderResponse {
    OrderResponse {
        id: order.id.to_string(),
        delivery_time: order.delivery_time,
        order_time: order.order_time,
        address: order.address,
        status: match order.status {
            OrderStatus::InProcess => OrderStatusDto::InProcess,
            OrderStatus::Delivered => OrderStatusDto::Delivered,
        },
    }
}

/// Resolve the acting user's email from the token subject.
async fn acting_email(state: &AppState, identity: &Identity) -> AppResult<String> {
    Ok(state.identity.profile(identity.user_id).await?.email)
}

/// POST /api/order - Protected route
pub async fn create_order(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<OrderCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = acting_email(&state, &identity).await?;

    let order = state
        .orders
        .create_order(
            OrderCreate {
                delivery_time: req.delivery_time,
                address: req.address,
            },
            &email,
        )
        .await?;

    Ok(HttpResponse::Created().json(order_response(order)))
}

/// POST /api/order/{id}/status - Protected route
pub async fn confirm_delivery(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let order_id = path.into_inner();
    let email = acting_email(&state, &identity).await?;

    state.orders.confirm_delivery(order_id, &email).await?;

    Ok(HttpResponse::NoContent().finish())
}
