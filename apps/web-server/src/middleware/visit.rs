//! Per-request view of the visitor: their session and who is signed in.

use actix_web::{
    FromRequest, HttpRequest, HttpResponse,
    dev::Payload,
    http::{Method, StatusCode, header, header::ContentType},
    web,
};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use sample_core::domain::User;
use sample_core::ports::BaseRepository;
use sample_shared::paths;

use super::error::{AppError, AppResult};
use super::session::{Flash, FlashKind, SESSION_COOKIE, Session};
use crate::state::AppState;
use crate::views::{self, View};

/// Session-aware extractor every page handler starts from.
///
/// Handlers finish through [`Visit::render`] or [`Visit::redirect`], which
/// write the session back and (re)issue its cookie.
pub struct Visit {
    state: web::Data<AppState>,
    session: Session,
    current_user: Option<User>,
    flash_now: Vec<Flash>,
}

impl FromRequest for Visit {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let session_id = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState not found in app data");
                AppError::Internal("Server configuration error".to_string())
            })?;

            let mut session = state.sessions.load(session_id.as_deref()).await;

            let current_user = match session.data.user_id {
                Some(user_id) => {
                    let user = state.users.find_by_id(user_id).await?;
                    if user.is_none() {
                        // Signed in as a user who has since been deleted.
                        session.data.user_id = None;
                    }
                    user
                }
                None => None,
            };

            Ok(Visit {
                state,
                session,
                current_user,
                flash_now: Vec::new(),
            })
        })
    }
}

impl Visit {
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_current_user(&self, user_id: Uuid) -> bool {
        self.current_user.as_ref().is_some_and(|u| u.id == user_id)
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.session.data.flash.push(Flash::new(kind, message));
    }

    /// Show a message on this response only.
    pub fn flash_now(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.flash_now.push(Flash::new(kind, message));
    }

    /// Sign `user` in under a fresh session id.
    pub async fn sign_in(&mut self, user: User) -> AppResult<()> {
        self.state.sessions.rotate(&mut self.session).await?;
        self.session.data.user_id = Some(user.id);
        tracing::info!(user_id = %user.id, "User signed in");
        self.current_user = Some(user);
        Ok(())
    }

    pub async fn sign_out(&mut self) -> AppResult<()> {
        if let Some(user) = self.current_user.take() {
            tracing::info!(user_id = %user.id, "User signed out");
        }
        self.state.sessions.reset(&mut self.session).await?;
        Ok(())
    }

    /// The page stored by [`Visit::require_sign_in`], if any.
    pub fn take_return_to(&mut self) -> Option<String> {
        self.session.data.return_to.take()
    }

    /// Send a signed-out visitor to the sign-in page, remembering where
    /// they were headed when that was a plain page view.
    pub async fn require_sign_in(mut self, req: &HttpRequest) -> AppResult<HttpResponse> {
        if req.method() == Method::GET {
            let path = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| req.path().to_string());
            self.session.data.return_to = Some(path);
        }
        self.flash(FlashKind::Notice, "Please sign in.");
        self.redirect(&paths::signin_path()).await
    }

    /// Render `view` inside the site layout, consuming pending flashes.
    pub async fn render(mut self, status: StatusCode, view: View) -> AppResult<HttpResponse> {
        let mut flashes = std::mem::take(&mut self.session.data.flash);
        flashes.append(&mut self.flash_now);

        let body = views::render(view, self.current_user.as_ref(), &flashes)?;
        let response = HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body);

        self.commit(response).await
    }

    pub async fn redirect(self, location: &str) -> AppResult<HttpResponse> {
        let response = HttpResponse::Found()
            .insert_header((header::LOCATION, location))
            .finish();

        self.commit(response).await
    }

    async fn commit(mut self, mut response: HttpResponse) -> AppResult<HttpResponse> {
        let sessions = &self.state.sessions;
        if sessions.save(&mut self.session).await? {
            response
                .add_cookie(&sessions.cookie(&self.session))
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }
        Ok(response)
    }
}
