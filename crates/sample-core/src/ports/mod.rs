//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod repository;

pub use auth::{AuthError, PasswordService};
pub use cache::{Cache, CacheError};
pub use repository::{
    BaseRepository, MicropostRepository, RelationshipRepository, UserRepository,
};
