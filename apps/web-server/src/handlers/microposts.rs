//! Posting and deleting microposts.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use uuid::Uuid;

use sample_core::domain::Micropost;
use sample_core::ports::BaseRepository;
use sample_shared::forms::MicropostForm;
use sample_shared::paths;

use super::pages::dashboard;
use crate::middleware::Visit;
use crate::middleware::error::AppResult;
use crate::middleware::session::FlashKind;
use crate::state::AppState;
use crate::views;

/// POST /microposts
pub async fn create(
    req: HttpRequest,
    mut visit: Visit,
    state: web::Data<AppState>,
    form: web::Form<MicropostForm>,
) -> AppResult<HttpResponse> {
    let Some(user) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };

    match Micropost::new(user.id, &form.content) {
        Ok(micropost) => {
            let micropost = state.microposts.save(micropost).await?;
            tracing::info!(user_id = %user.id, micropost_id = %micropost.id, "Micropost created");
            visit.flash(FlashKind::Success, "Micropost created!");
            visit.redirect(&paths::root_path()).await
        }
        Err(errors) => {
            let dashboard = dashboard(&state, user, None).await?;
            let view = views::pages::home(&dashboard, &form.content, &errors);
            visit.render(StatusCode::UNPROCESSABLE_ENTITY, view).await
        }
    }
}

/// DELETE /microposts/{id}
pub async fn destroy(
    req: HttpRequest,
    mut visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(user) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };

    let id = path.into_inner();
    let owned = state
        .microposts
        .find_by_id(id)
        .await?
        .filter(|m| m.user_id == user.id);
    if owned.is_none() {
        return visit.redirect(&paths::root_path()).await;
    }

    state.microposts.delete(id).await?;
    tracing::info!(user_id = %user.id, micropost_id = %id, "Micropost deleted");

    visit.flash(FlashKind::Success, "Micropost deleted.");
    visit.redirect(&paths::root_path()).await
}
