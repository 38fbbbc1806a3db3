//! Server-side sessions stored in the cache, keyed by a cookie.

use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sample_core::ports::{Cache, CacheError};

use crate::config::SessionConfig;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "_sample_app_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Notice,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Notice => "notice",
            FlashKind::Error => "error",
        }
    }
}

/// A message shown once, on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn new(kind: FlashKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Everything remembered between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub flash: Vec<Flash>,
    /// Where to go after signing in.
    pub return_to: Option<String>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.flash.is_empty() && self.return_to.is_none()
    }
}

/// A loaded session. `fresh` sessions have no cache entry yet.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    fresh: bool,
    pub data: SessionData,
}

impl Session {
    fn fresh() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            fresh: true,
            data: SessionData::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Loads and persists sessions through the [`Cache`] port.
#[derive(Clone)]
pub struct SessionStore {
    cache: Arc<dyn Cache>,
    ttl: Duration,
    secure: bool,
}

impl SessionStore {
    pub fn new(cache: Arc<dyn Cache>, config: &SessionConfig) -> Self {
        Self {
            cache,
            ttl: config.ttl,
            secure: config.secure_cookie,
        }
    }

    fn key(id: &str) -> String {
        format!("session:{id}")
    }

    /// Load the session behind a cookie value. Unknown, expired or
    /// unreadable sessions come back fresh.
    pub async fn load(&self, id: Option<&str>) -> Session {
        let Some(id) = id else {
            return Session::fresh();
        };

        let Some(raw) = self.cache.get(&Self::key(id)).await else {
            tracing::debug!("Session not found, starting a new one");
            return Session::fresh();
        };

        match serde_json::from_str(&raw) {
            Ok(data) => Session {
                id: id.to_string(),
                fresh: false,
                data,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session");
                Session::fresh()
            }
        }
    }

    /// Persist the session, refreshing its TTL. Returns whether a cookie
    /// should be sent; empty sessions that were never stored are skipped.
    pub async fn save(&self, session: &mut Session) -> Result<bool, CacheError> {
        if session.fresh && session.data.is_empty() {
            return Ok(false);
        }

        let raw = serde_json::to_string(&session.data)
            .map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache
            .set(&Self::key(&session.id), &raw, Some(self.ttl))
            .await?;
        session.fresh = false;

        Ok(true)
    }

    /// Move the session to a new id, dropping the old cache entry.
    pub async fn rotate(&self, session: &mut Session) -> Result<(), CacheError> {
        if !session.fresh {
            self.cache.delete(&Self::key(&session.id)).await?;
        }
        let data = std::mem::take(&mut session.data);
        *session = Session::fresh();
        session.data = data;
        Ok(())
    }

    /// Forget everything and start over under a new id.
    pub async fn reset(&self, session: &mut Session) -> Result<(), CacheError> {
        self.rotate(session).await?;
        session.data = SessionData::default();
        Ok(())
    }

    pub fn cookie(&self, session: &Session) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, session.id.clone());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_secure(self.secure);
        cookie
    }
}
