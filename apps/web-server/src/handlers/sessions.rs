//! Sign in and sign out.

use actix_web::{HttpResponse, http::StatusCode, web};

use sample_shared::forms::SessionForm;
use sample_shared::paths;

use crate::middleware::Visit;
use crate::middleware::error::AppResult;
use crate::middleware::session::FlashKind;
use crate::state::AppState;
use crate::views;

/// GET /signin
pub async fn new(visit: Visit) -> AppResult<HttpResponse> {
    visit
        .render(StatusCode::OK, views::sessions::signin(""))
        .await
}

/// POST /sessions
pub async fn create(
    mut visit: Visit,
    state: web::Data<AppState>,
    form: web::Form<SessionForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    let user = match state.users.find_by_email(&form.email).await? {
        Some(user) if state.passwords.verify(&form.password, &user.password_hash)? => Some(user),
        _ => None,
    };

    let Some(user) = user else {
        tracing::debug!("Sign in rejected");
        visit.flash_now(FlashKind::Error, "Invalid email/password combination");
        let view = views::sessions::signin(&form.email);
        return visit.render(StatusCode::UNPROCESSABLE_ENTITY, view).await;
    };

    let location = visit
        .take_return_to()
        .unwrap_or_else(|| paths::user_path(user.id));
    visit.sign_in(user).await?;
    visit.redirect(&location).await
}

/// DELETE /signout
pub async fn destroy(mut visit: Visit) -> AppResult<HttpResponse> {
    visit.sign_out().await?;
    visit.redirect(&paths::root_path()).await
}
