use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Micropost, Relationship, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
///
/// Deleting a user also removes their microposts and every relationship
/// they take part in. Emails are unique case-insensitively; saving a
/// duplicate yields `RepoError::Constraint`.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address, ignoring case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Users with any of the given ids, in signup order. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// All users in signup order.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepoError>;
}

/// Micropost repository. Listings are newest first.
#[async_trait]
pub trait MicropostRepository: BaseRepository<Micropost, Uuid> {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Micropost>, RepoError>;

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, RepoError>;

    /// The user's own microposts plus those of every user they follow.
    async fn feed(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Micropost>, RepoError>;
}

/// Follower graph repository. Each (follower, followed) pair is unique.
#[async_trait]
pub trait RelationshipRepository: BaseRepository<Relationship, Uuid> {
    async fn find_by_pair(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Relationship>, RepoError>;

    /// Users that `user_id` follows.
    async fn followed_users(&self, user_id: Uuid, page: PageRequest)
    -> Result<Page<User>, RepoError>;

    /// Users following `user_id`.
    async fn followers(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, RepoError>;

    async fn count_followed(&self, user_id: Uuid) -> Result<u64, RepoError>;

    async fn count_followers(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
