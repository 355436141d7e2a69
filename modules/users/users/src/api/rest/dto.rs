use serde::{Deserialize, Serialize};
use users_sdk::{NewUser, Password, User};
use uuid::Uuid;

/// REST DTO for user representation. The password is never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    pub image_id: Option<String>,
    pub country_code: String,
    pub birthday: String,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserReq {
    pub email: String,
    pub nickname: String,
    pub password: String,
    pub country_code: String,
    pub birthday: String,
}

/// Paging for `GET /api/v1/users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Query of `GET /api/v1/users/email`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmailQuery {
    pub address: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            image_id: user.image_id,
            country_code: user.country_code,
            birthday: user.birthday,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            nickname: req.nickname,
            password: Password::new(req.password),
            country_code: req.country_code,
            birthday: req.birthday,
        }
    }
}
