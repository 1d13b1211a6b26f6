use chrono::{TimeDelta, TimeZone, Utc};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr, SqlErr};
use uuid::Uuid;

use delivery_core::DomainError;
use delivery_core::error::RepoError;
use delivery_core::domain::{Gender, OrderCreate, OrderStatus, User};
use delivery_core::ports::{OrderService, UserRepository};

use crate::database::entity::{order, user};
use crate::database::postgres_repo::{
    PostgresOrderService, PostgresUserRepository, classify_db_error,
};

fn user_model(id: Uuid, email: &str) -> user::Model {
    user::Model {
        id,
        full_name: "Grace Hopper".to_owned(),
        password: "pw".to_owned(),
        email: email.to_owned(),
        gender: "Female".to_owned(),
        birth_date: Utc.with_ymd_and_hms(1906, 12, 9, 0, 0, 0).unwrap().into(),
        address: Some("Arlington".to_owned()),
        phone_number: None,
    }
}

fn order_model(id: Uuid, email: &str, status: &str) -> order::Model {
    let now = Utc::now();
    order::Model {
        id,
        user_email: email.to_owned(),
        delivery_time: (now + TimeDelta::hours(1)).into(),
        order_time: now.into(),
        address: "Arlington".to_owned(),
        status: status.to_owned(),
    }
}

#[tokio::test]
async fn test_find_user_by_email() {
    let user_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(user_id, "grace@navy.mil")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user = repo.find_by_email("grace@navy.mil").await.unwrap().unwrap();

    assert_eq!(user.id, user_id);
    assert_eq!(user.gender, Gender::Female);
    assert_eq!(user.address.as_deref(), Some("Arlington"));
}

#[tokio::test]
async fn test_find_user_by_email_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<user::Model>::new()])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_email("nobody@x.y").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_user_with_corrupt_gender() {
    let mut model = user_model(Uuid::new_v4(), "grace@navy.mil");
    model.gender = "Unknown".to_owned();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    assert!(repo.find_by_id(Uuid::new_v4()).await.is_err());
}

#[tokio::test]
async fn test_insert_user_returns_stored_row() {
    let user_id = Uuid::new_v4();
    let model = user_model(user_id, "grace@navy.mil");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model.clone()]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let user = User::try_from(model).unwrap();

    let saved = repo.insert(user).await.unwrap();

    assert_eq!(saved.id, user_id);
    assert_eq!(saved.email, "grace@navy.mil");
}

#[tokio::test]
async fn test_create_order() {
    let order_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![order_model(order_id, "grace@navy.mil", "InProcess")]])
        .into_connection();

    let service = PostgresOrderService::new(db);

    let order = service
        .create_order(
            OrderCreate {
                delivery_time: Utc::now() + TimeDelta::hours(1),
                address: "Arlington".to_owned(),
            },
            "grace@navy.mil",
        )
        .await
        .unwrap();

    assert_eq!(order.id, order_id);
    assert_eq!(order.status, OrderStatus::InProcess);
}

#[tokio::test]
async fn test_confirm_delivery_by_owner() {
    let order_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![
            vec![order_model(order_id, "grace@navy.mil", "InProcess")],
            vec![order_model(order_id, "grace@navy.mil", "Delivered")],
        ])
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let service = PostgresOrderService::new(db);

    service
        .confirm_delivery(order_id, "grace@navy.mil")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_confirm_delivery_by_other_user_is_forbidden() {
    let order_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![order_model(order_id, "grace@navy.mil", "InProcess")]])
        .into_connection();

    let service = PostgresOrderService::new(db);

    let err = service
        .confirm_delivery(order_id, "mallory@evil.org")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn test_confirm_delivery_unknown_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<order::Model>::new()])
        .into_connection();

    let service = PostgresOrderService::new(db);

    let err = service
        .confirm_delivery(Uuid::new_v4(), "grace@navy.mil")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::NotFound { entity_type: "Order", .. }));
}

#[test]
fn test_unique_violation_maps_to_constraint() {
    let err = DbErr::Exec(RuntimeErr::Internal(
        "duplicate key value violates unique constraint \"users_email_key\"".to_owned(),
    ));

    let mapped = classify_db_error(
        Some(SqlErr::UniqueConstraintViolation("users_email_key".to_owned())),
        err,
    );

    assert!(matches!(mapped, RepoError::Constraint(ref detail) if detail == "users_email_key"));
}

#[test]
fn test_other_db_errors_are_classified() {
    assert!(matches!(
        classify_db_error(None, DbErr::RecordNotUpdated),
        RepoError::NotFound
    ));
    assert!(matches!(
        classify_db_error(None, DbErr::Conn(RuntimeErr::Internal("refused".to_owned()))),
        RepoError::Connection(_)
    ));
    assert!(matches!(
        classify_db_error(None, DbErr::Custom("boom".to_owned())),
        RepoError::Query(_)
    ));
}
