//! SeaORM entities, one per table.

pub mod micropost;
pub mod relationship;
pub mod user;
