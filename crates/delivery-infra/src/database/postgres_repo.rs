//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, SqlErr};
use uuid::Uuid;

use delivery_core::DomainError;
use delivery_core::domain::{Order, OrderCreate, User, mask_email};
use delivery_core::error::RepoError;
use delivery_core::ports::{OrderService, UserRepository};

use super::entity::order::{self, Entity as OrderEntity};
use super::entity::user::{self, Entity as UserEntity};

fn query_error(e: DbErr) -> RepoError {
    classify_db_error(e.sql_err(), e)
}

/// Map a driver error onto `RepoError`. `sql_err` is the decoded SQLSTATE, if any.
pub(crate) fn classify_db_error(sql_err: Option<SqlErr>, e: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = sql_err {
        return RepoError::Constraint(detail);
    }
    match e {
        DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(err) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_error)?
            .map(User::try_from)
            .transpose()
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = user.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;

        User::try_from(model)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let active_model: user::ActiveModel = user.into();
        let model = active_model.update(&self.db).await.map_err(query_error)?;

        User::try_from(model)
    }
}

/// PostgreSQL-backed order service.
pub struct PostgresOrderService {
    db: DbConn,
}

impl PostgresOrderService {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderService for PostgresOrderService {
    async fn create_order(
        &self,
        payload: OrderCreate,
        email: &str,
    ) -> Result<Order, DomainError> {
        let order = Order::place(payload, email.to_string(), Utc::now())?;

        let active_model: order::ActiveModel = order.into();
        let model = active_model.insert(&self.db).await.map_err(query_error)?;
        let order = Order::try_from(model)?;

        tracing::info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    async fn confirm_delivery(&self, order_id: Uuid, email: &str) -> Result<(), DomainError> {
        let model = OrderEntity::find_by_id(order_id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(DomainError::NotFound {
                entity_type: "Order",
                id: order_id,
            })?;

        let mut order = Order::try_from(model)?;
        order.confirm_delivery_by(email)?;

        let active_model: order::ActiveModel = order.into();
        active_model.update(&self.db).await.map_err(query_error)?;

        tracing::info!(%order_id, "Order delivered");
        Ok(())
    }
}
