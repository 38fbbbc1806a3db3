use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{ValidationErrors, is_valid_email};

/// User entity - a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Always stored downcased.
    pub email: String,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const NAME_MAX_LEN: usize = 50;
    pub const PASSWORD_MIN_LEN: usize = 6;

    /// Create a new, non-admin user with generated ID and timestamps.
    pub fn new(name: impl Into<String>, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: Self::normalize_email(email),
            password_hash,
            admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Apply already-validated profile changes.
    pub fn update_profile(&mut self, name: &str, email: &str, password_hash: Option<String>) {
        self.name = name.trim().to_string();
        self.email = Self::normalize_email(email);
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        self.updated_at = Utc::now();
    }
}

/// Attributes submitted through the signup or settings form.
#[derive(Debug, Clone, Copy)]
pub struct UserChanges<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

impl UserChanges<'_> {
    /// Whether the submission carries a new password.
    pub fn changes_password(&self) -> bool {
        !self.password.is_empty() || !self.password_confirmation.is_empty()
    }

    /// Validates everything except email uniqueness, which needs the store.
    ///
    /// With `password_required` unset, a blank password keeps the current
    /// one and is not validated.
    pub fn validate(&self, password_required: bool) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if errors.presence("Name", self.name) {
            errors.maximum("Name", self.name.trim(), User::NAME_MAX_LEN);
        }

        if errors.presence("Email", self.email) {
            if !is_valid_email(self.email.trim()) {
                errors.add("Email is invalid");
            }
        } else {
            errors.add("Email is invalid");
        }

        if password_required || self.changes_password() {
            if errors.presence("Password", self.password) {
                errors.minimum("Password", self.password, User::PASSWORD_MIN_LEN);
            }
            if self.password != self.password_confirmation {
                errors.add("Password confirmation doesn't match Password");
            }
        }

        errors
    }
}
