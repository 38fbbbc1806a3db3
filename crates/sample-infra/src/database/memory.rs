//! In-memory store - used when no database is configured and by the tests.
//!
//! One set of tables is shared by the three repositories so that cascades
//! and joins see a consistent state. Rows are kept in insertion order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use sample_core::domain::{Micropost, Relationship, User};
use sample_core::error::RepoError;
use sample_core::pagination::{Page, PageRequest};
use sample_core::ports::{
    BaseRepository, MicropostRepository, RelationshipRepository, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    microposts: Vec<Micropost>,
    relationships: Vec<Relationship>,
}

impl Tables {
    fn users_by_ids(&self, ids: impl Iterator<Item = Uuid>) -> Vec<User> {
        let ids: Vec<Uuid> = ids.collect();
        self.users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect()
    }

    /// Newest first; ties keep the later insertion first.
    fn microposts_where(&self, keep: impl Fn(&Micropost) -> bool) -> Vec<Micropost> {
        let mut posts: Vec<Micropost> = self
            .microposts
            .iter()
            .rev()
            .filter(|m| keep(*m))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

type SharedTables = Arc<RwLock<Tables>>;

/// Handle to the shared tables; hands out one repository per entity.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: SharedTables,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn microposts(&self) -> InMemoryMicropostRepository {
        InMemoryMicropostRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn relationships(&self) -> InMemoryRelationshipRepository {
        InMemoryRelationshipRepository {
            tables: self.tables.clone(),
        }
    }
}

/// Upsert by id.
fn upsert<T: Clone>(rows: &mut Vec<T>, row: T, id_of: impl Fn(&T) -> Uuid) -> T {
    let id = id_of(&row);
    match rows.iter_mut().find(|existing| id_of(existing) == id) {
        Some(existing) => *existing = row.clone(),
        None => rows.push(row.clone()),
    }
    row
}

pub struct InMemoryUserRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;

        let taken = tables
            .users
            .iter()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(RepoError::Constraint(
                "users.email must be unique".to_string(),
            ));
        }

        Ok(upsert(&mut tables.users, user, |u| u.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;

        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepoError::NotFound);
        }

        tables.microposts.retain(|m| m.user_id != id);
        tables
            .relationships
            .retain(|r| r.follower_id != id && r.followed_id != id);

        tracing::debug!(user_id = %id, "Deleted user with dependent rows");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users_by_ids(ids.iter().copied()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.tables.read().await.users.len() as u64)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(Page::from_vec(tables.users.clone(), page))
    }
}

pub struct InMemoryMicropostRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<Micropost, Uuid> for InMemoryMicropostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Micropost>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.microposts.iter().find(|m| m.id == id).cloned())
    }

    async fn save(&self, micropost: Micropost) -> Result<Micropost, RepoError> {
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == micropost.user_id) {
            return Err(RepoError::Constraint(
                "microposts.user_id must reference a user".to_string(),
            ));
        }

        Ok(upsert(&mut tables.microposts, micropost, |m| m.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.microposts.len();
        tables.microposts.retain(|m| m.id != id);
        if tables.microposts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl MicropostRepository for InMemoryMicropostRepository {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Micropost>, RepoError> {
        let tables = self.tables.read().await;
        let posts = tables.microposts_where(|m| m.user_id == user_id);
        Ok(Page::from_vec(posts, page))
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .microposts
            .iter()
            .filter(|m| m.user_id == user_id)
            .count() as u64)
    }

    async fn feed(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Micropost>, RepoError> {
        let tables = self.tables.read().await;
        let followed: Vec<Uuid> = tables
            .relationships
            .iter()
            .filter(|r| r.follower_id == user_id)
            .map(|r| r.followed_id)
            .collect();

        let posts =
            tables.microposts_where(|m| m.user_id == user_id || followed.contains(&m.user_id));
        Ok(Page::from_vec(posts, page))
    }
}

pub struct InMemoryRelationshipRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<Relationship, Uuid> for InMemoryRelationshipRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Relationship>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.relationships.iter().find(|r| r.id == id).cloned())
    }

    async fn save(&self, relationship: Relationship) -> Result<Relationship, RepoError> {
        let mut tables = self.tables.write().await;

        let duplicate = tables.relationships.iter().any(|r| {
            r.id != relationship.id
                && r.follower_id == relationship.follower_id
                && r.followed_id == relationship.followed_id
        });
        if duplicate {
            return Err(RepoError::Constraint(
                "relationships (follower_id, followed_id) must be unique".to_string(),
            ));
        }

        let known = |id: Uuid| tables.users.iter().any(|u| u.id == id);
        if !known(relationship.follower_id) || !known(relationship.followed_id) {
            return Err(RepoError::Constraint(
                "relationships must reference existing users".to_string(),
            ));
        }

        Ok(upsert(&mut tables.relationships, relationship, |r| r.id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        let before = tables.relationships.len();
        tables.relationships.retain(|r| r.id != id);
        if tables.relationships.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryRelationshipRepository {
    async fn find_by_pair(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Relationship>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .relationships
            .iter()
            .find(|r| r.follower_id == follower_id && r.followed_id == followed_id)
            .cloned())
    }

    async fn followed_users(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RepoError> {
        let tables = self.tables.read().await;
        let ids = tables
            .relationships
            .iter()
            .filter(|r| r.follower_id == user_id)
            .map(|r| r.followed_id);
        Ok(Page::from_vec(tables.users_by_ids(ids), page))
    }

    async fn followers(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, RepoError> {
        let tables = self.tables.read().await;
        let ids = tables
            .relationships
            .iter()
            .filter(|r| r.followed_id == user_id)
            .map(|r| r.follower_id);
        Ok(Page::from_vec(tables.users_by_ids(ids), page))
    }

    async fn count_followed(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .relationships
            .iter()
            .filter(|r| r.follower_id == user_id)
            .count() as u64)
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .relationships
            .iter()
            .filter(|r| r.followed_id == user_id)
            .count() as u64)
    }
}
