//! SeaORM persistence for user records.
//!
//! - `entity` - the `users` table
//! - `mapper` - conversions between rows and `users_sdk::User`
//! - `migrations` - schema migrations, applied at module start
//! - `sea_repo` - the `UserStore` implementation

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod sea_repo;

pub use sea_repo::SeaUserStore;
