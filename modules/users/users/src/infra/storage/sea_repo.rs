use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use users_sdk::User;
use uuid::Uuid;

use crate::domain::ports::{DuplicateEmail, UserStore};

use super::entity::{Column, Entity as UsersEntity};
use super::mapper::{to_active_model, to_changes};

/// `UserStore` backed by a SeaORM connection.
///
/// Every write is a single statement, so per-record atomicity comes from
/// the database.
pub struct SeaUserStore {
    db: DatabaseConnection,
}

impl SeaUserStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for SeaUserStore {
    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = UsersEntity::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = UsersEntity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self, limit: u64, offset: u64) -> anyhow::Result<Vec<User>> {
        let rows = UsersEntity::find()
            .order_by_asc(Column::Email)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        UsersEntity::insert(to_active_model(user))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DuplicateEmail {
                    email: user.email.clone(),
                }
                .into(),
                _ => anyhow::Error::from(e),
            })?;
        Ok(())
    }

    async fn update(&self, user: &User) -> anyhow::Result<()> {
        let result = UsersEntity::update_many()
            .set(to_changes(user))
            .filter(Column::Id.eq(user.id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            anyhow::bail!("no user row with id {}", user.id);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = UsersEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
