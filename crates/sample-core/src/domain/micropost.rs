use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::ValidationErrors;

/// Micropost entity - a short status update owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Micropost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Micropost {
    pub const CONTENT_MAX_LEN: usize = 140;

    /// Build a micropost, validating its content.
    pub fn new(user_id: Uuid, content: &str) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if errors.presence("Content", content) {
            errors.maximum("Content", content, Self::CONTENT_MAX_LEN);
        }
        errors.into_result()?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }
}
