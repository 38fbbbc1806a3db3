use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Directed follower edge: `follower_id` follows `followed_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: Uuid,
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Create an edge between two distinct users.
    pub fn new(follower_id: Uuid, followed_id: Uuid) -> Result<Self, DomainError> {
        if follower_id == followed_id {
            return Err(DomainError::SelfFollow);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            follower_id,
            followed_id,
            created_at: now,
            updated_at: now,
        })
    }
}
