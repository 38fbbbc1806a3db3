//! # Sample Core
//!
//! The domain layer of the sample app: users, microposts and follower
//! relationships, their validation rules, and the ports infrastructure
//! has to implement. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod validation;

pub use error::DomainError;
pub use pagination::{Page, PageRequest};
pub use validation::ValidationErrors;
