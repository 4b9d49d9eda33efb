use async_trait::async_trait;
use company_registry_sdk::User;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::db::db_err;
use super::entity::user::{Column, Entity as UserEntity};
use super::mapper::user_insert;
use crate::domain::error::DomainError;
use crate::domain::fields::entity_names::USER;
use crate::domain::repos::UsersRepository;

/// SeaORM implementation of [`UsersRepository`].
#[derive(Clone)]
pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let model = user_insert(user)?
            .insert(&self.db)
            .await
            .map_err(db_err(USER))?;
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err(USER))?
            .map(Into::into)
            .ok_or_else(|| DomainError::not_found(USER))
    }

    async fn get_by_username(&self, username: &str) -> Result<User, DomainError> {
        UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err(USER))?
            .map(Into::into)
            .ok_or_else(|| DomainError::not_found(USER))
    }
}
