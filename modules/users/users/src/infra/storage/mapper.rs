use sea_orm::ActiveValue::Set;
use users_sdk::{Password, User};

use super::entity::{ActiveModel, Model as UserRow};

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            nickname: row.nickname,
            password: Password::new(row.password),
            image_id: row.image_id,
            country_code: row.country_code,
            birthday: row.birthday,
        }
    }
}

/// Every column set, for inserts.
pub fn to_active_model(user: &User) -> ActiveModel {
    ActiveModel {
        id: Set(user.id),
        ..to_changes(user)
    }
}

/// Every column except the primary key, for updates by ID.
pub fn to_changes(user: &User) -> ActiveModel {
    ActiveModel {
        email: Set(user.email.clone()),
        nickname: Set(user.nickname.clone()),
        password: Set(user.password.expose().to_owned()),
        image_id: Set(user.image_id.clone()),
        country_code: Set(user.country_code.clone()),
        birthday: Set(user.birthday.clone()),
        ..Default::default()
    }
}
