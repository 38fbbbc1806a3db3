//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Query, SelectStatement};
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use sample_core::domain::{Micropost, Relationship, User};
use sample_core::error::RepoError;
use sample_core::pagination::{Page, PageRequest};
use sample_core::ports::{MicropostRepository, RelationshipRepository, UserRepository};

use super::entity::micropost::{self, Entity as MicropostEntity};
use super::entity::relationship::{self, Entity as RelationshipEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository. Deletes cascade through foreign keys.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL micropost repository.
pub type PostgresMicropostRepository = PostgresBaseRepository<MicropostEntity>;

/// PostgreSQL relationship repository.
pub type PostgresRelationshipRepository = PostgresBaseRepository<RelationshipEntity>;

async fn fetch_page<E>(
    db: &DbConn,
    query: Select<E>,
    request: PageRequest,
) -> Result<Page<E::Model>, RepoError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let paginator = query.paginate(db, request.per_page);
    let total = paginator.num_items().await.map_err(map_db_err)?;
    let items = paginator
        .fetch_page(request.page.saturating_sub(1))
        .await
        .map_err(map_db_err)?;

    Ok(Page {
        items,
        page: request.page,
        per_page: request.per_page,
        total,
    })
}

/// `SELECT followed_id FROM relationships WHERE follower_id = $1`
fn followed_ids_of(user_id: Uuid) -> SelectStatement {
    Query::select()
        .column(relationship::Column::FollowedId)
        .from(RelationshipEntity)
        .and_where(relationship::Column::FollowerId.eq(user_id))
        .to_owned()
}

/// `SELECT follower_id FROM relationships WHERE followed_id = $1`
fn follower_ids_of(user_id: Uuid) -> SelectStatement {
    Query::select()
        .column(relationship::Column::FollowerId)
        .from(RelationshipEntity)
        .and_where(relationship::Column::FollowedId.eq(user_id))
        .to_owned()
}

fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = match local.chars().next() {
            Some(first) if local.len() > 1 => format!("{first}***"),
            _ => "***".to_string(),
        };
        format!("{masked_local}{domain}")
    } else {
        "***".to_string()
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(User::normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        UserEntity::find().count(&self.db).await.map_err(map_db_err)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepoError> {
        let query = UserEntity::find().order_by_asc(user::Column::CreatedAt);
        Ok(fetch_page(&self.db, query, page).await?.map(Into::into))
    }
}

#[async_trait]
impl MicropostRepository for PostgresMicropostRepository {
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Micropost>, RepoError> {
        let query = MicropostEntity::find()
            .filter(micropost::Column::UserId.eq(user_id))
            .order_by_desc(micropost::Column::CreatedAt);
        Ok(fetch_page(&self.db, query, page).await?.map(Into::into))
    }

    async fn count_by_user(&self, user_id: Uuid) -> Result<u64, RepoError> {
        MicropostEntity::find()
            .filter(micropost::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn feed(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Micropost>, RepoError> {
        let query = MicropostEntity::find()
            .filter(
                Condition::any()
                    .add(micropost::Column::UserId.eq(user_id))
                    .add(micropost::Column::UserId.in_subquery(followed_ids_of(user_id))),
            )
            .order_by_desc(micropost::Column::CreatedAt);
        Ok(fetch_page(&self.db, query, page).await?.map(Into::into))
    }
}

#[async_trait]
impl RelationshipRepository for PostgresRelationshipRepository {
    async fn find_by_pair(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> Result<Option<Relationship>, RepoError> {
        let result = RelationshipEntity::find()
            .filter(relationship::Column::FollowerId.eq(follower_id))
            .filter(relationship::Column::FollowedId.eq(followed_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn followed_users(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, RepoError> {
        let query = UserEntity::find()
            .filter(user::Column::Id.in_subquery(followed_ids_of(user_id)))
            .order_by_asc(user::Column::CreatedAt);
        Ok(fetch_page(&self.db, query, page).await?.map(Into::into))
    }

    async fn followers(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, RepoError> {
        let query = UserEntity::find()
            .filter(user::Column::Id.in_subquery(follower_ids_of(user_id)))
            .order_by_asc(user::Column::CreatedAt);
        Ok(fetch_page(&self.db, query, page).await?.map(Into::into))
    }

    async fn count_followed(&self, user_id: Uuid) -> Result<u64, RepoError> {
        RelationshipEntity::find()
            .filter(relationship::Column::FollowerId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn count_followers(&self, user_id: Uuid) -> Result<u64, RepoError> {
        RelationshipEntity::find()
            .filter(relationship::Column::FollowedId.eq(user_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
