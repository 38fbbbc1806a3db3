//! # Sample Infrastructure
//!
//! Concrete implementations of the ports defined in `sample-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - In-memory store only

pub mod auth;
pub mod cache;
pub mod database;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::{DatabaseConfig, InMemoryStore};

pub use auth::{Argon2PasswordService, PasswordConfig};

#[cfg(feature = "postgres")]
pub use database::{
    PostgresMicropostRepository, PostgresRelationshipRepository, PostgresUserRepository, connect,
};
