//! Order entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use delivery_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_email: String,
    pub delivery_time: DateTimeWithTimeZone,
    pub order_time: DateTimeWithTimeZone,
    pub address: String,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for delivery_core::domain::Order {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            user_email: model.user_email,
            delivery_time: model.delivery_time.into(),
            order_time: model.order_time.into(),
            address: model.address,
            status: model.status.parse().map_err(RepoError::Query)?,
        })
    }
}

impl From<delivery_core::domain::Order> for ActiveModel {
    fn from(order: delivery_core::domain::Order) -> Self {
        Self {
            id: Set(order.id),
            user_email: Set(order.user_email),
            delivery_time: Set(order.delivery_time.into()),
            order_time: Set(order.order_time.into()),
            address: Set(order.address),
            status: Set(order.status.as_str().to_string()),
        }
    }
}
