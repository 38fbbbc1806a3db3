//! Relationship (follower edge) entity for SeaORM.
//!
//! Both ends reference `users`, so there is no single `Related` impl; joins
//! go through [`Relation::Follower`] or [`Relation::Followed`] explicitly.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Follower,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FollowedId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Followed,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for sample_core::domain::Relationship {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            follower_id: model.follower_id,
            followed_id: model.followed_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<sample_core::domain::Relationship> for ActiveModel {
    fn from(relationship: sample_core::domain::Relationship) -> Self {
        Self {
            id: Set(relationship.id),
            follower_id: Set(relationship.follower_id),
            followed_id: Set(relationship.followed_id),
            created_at: Set(relationship.created_at.into()),
            updated_at: Set(relationship.updated_at.into()),
        }
    }
}
