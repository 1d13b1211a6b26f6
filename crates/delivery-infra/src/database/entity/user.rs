//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use delivery_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub password: String,
    #[sea_orm(unique)]
    pub email: String,
    pub gender: String,
    pub birth_date: DateTimeWithTimeZone,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl TryFrom<Model> for delivery_core::domain::User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            full_name: model.full_name,
            password: model.password,
            email: model.email,
            gender: model.gender.parse().map_err(RepoError::Query)?,
            birth_date: model.birth_date.into(),
            address: model.address,
            phone_number: model.phone_number,
        })
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<delivery_core::domain::User> for ActiveModel {
    fn from(user: delivery_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            full_name: Set(user.full_name),
            password: Set(user.password),
            email: Set(user.email),
            gender: Set(user.gender.as_str().to_string()),
            birth_date: Set(user.birth_date.into()),
            address: Set(user.address),
            phone_number: Set(user.phone_number),
        }
    }
}
