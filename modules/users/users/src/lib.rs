//! Users Module
//!
//! User management over REST: listing, lookup by email, creation,
//! deletion, and the multipart profile update workflow (form decoding,
//! field rules, image upload, persistence).
//!
//! ## Public API
//!
//! The public API is defined in the `users-sdk` crate and re-exported here.
//! In-process consumers obtain a [`UsersClient`] from [`Users::client`].

// === PUBLIC API (from SDK) ===
pub use users_sdk::{NewUser, Password, User, UsersClient, UsersError};

// === MODULE DEFINITION ===
pub mod module;
pub use module::Users;

// === LOCAL CLIENT ===
pub mod local_client;

// === INTERNAL MODULES ===
// Exposed for integration tests and the server binary; use the SDK types
// for anything else.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
