//! Form payloads, named the way the HTML forms name their fields.
//!
//! Every field defaults to empty so a partially filled form still decodes
//! and reaches validation. Fields not listed here (`user[admin]`, the
//! submit button) are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Signup and profile settings form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(rename = "user[name]", default)]
    pub name: String,
    #[serde(rename = "user[email]", default)]
    pub email: String,
    #[serde(rename = "user[password]", default)]
    pub password: String,
    #[serde(rename = "user[password_confirmation]", default)]
    pub password_confirmation: String,
}

/// Sign-in form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionForm {
    #[serde(rename = "session[email]", default)]
    pub email: String,
    #[serde(rename = "session[password]", default)]
    pub password: String,
}

/// New micropost form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MicropostForm {
    #[serde(rename = "micropost[content]", default)]
    pub content: String,
}

/// Follow button form. An id that does not parse reads as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationshipForm {
    #[serde(
        rename = "relationship[followed_id]",
        default,
        deserialize_with = "lenient_uuid"
    )]
    pub followed_id: Option<Uuid>,
}

fn lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| Uuid::parse_str(value.trim()).ok()))
}

/// `?page=N` on paginated listings. Anything that is not a number reads as
/// no page at all.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<u64>,
}

fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}
