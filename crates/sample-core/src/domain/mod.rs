//! Domain entities - the core business objects.

mod micropost;
mod relationship;
mod user;

pub use micropost::Micropost;
pub use relationship::Relationship;
pub use user::{User, UserChanges};

/// Entities addressable by their primary key.
pub trait Keyed<ID> {
    fn key(&self) -> ID;
}

impl Keyed<uuid::Uuid> for User {
    fn key(&self) -> uuid::Uuid {
        self.id
    }
}

impl Keyed<uuid::Uuid> for Micropost {
    fn key(&self) -> uuid::Uuid {
        self.id
    }
}

impl Keyed<uuid::Uuid> for Relationship {
    fn key(&self) -> uuid::Uuid {
        self.id
    }
}
