//! Users SDK
//!
//! This crate provides the public API for the `users` module:
//! - `UsersClient` trait
//! - Model types (`User`, `NewUser`, `Password`)
//! - Error type (`UsersError`)
//!
//! ## Usage
//!
//! ```ignore
//! use users_sdk::UsersClient;
//!
//! let client: Arc<dyn UsersClient> = users_module.client();
//! let user = client.get_user_by_email("makoto@shishio.com").await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod client;
pub mod errors;
pub mod models;

pub use client::UsersClient;
pub use errors::UsersError;
pub use models::{NewUser, Password, User};
