//! Persistence: an in-memory store, plus SeaORM repositories with the
//! `postgres` feature.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

pub use connections::DatabaseConfig;
pub use memory::{
    InMemoryMicropostRepository, InMemoryRelationshipRepository, InMemoryStore,
    InMemoryUserRepository,
};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresMicropostRepository, PostgresRelationshipRepository, PostgresUserRepository,
};
