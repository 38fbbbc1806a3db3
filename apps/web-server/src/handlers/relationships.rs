//! Following and unfollowing.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use sample_core::domain::Relationship;
use sample_core::error::{DomainError, RepoError};
use sample_core::ports::BaseRepository;
use sample_shared::forms::RelationshipForm;
use sample_shared::paths;

use crate::middleware::Visit;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::FlashKind;
use crate::state::AppState;

/// POST /relationships
pub async fn create(
    req: HttpRequest,
    mut visit: Visit,
    state: web::Data<AppState>,
    form: web::Form<RelationshipForm>,
) -> AppResult<HttpResponse> {
    let Some(user) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };

    let Some(followed_id) = form.followed_id else {
        return Err(AppError::NotFound("No user to follow".to_string()));
    };
    if state.users.find_by_id(followed_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "User with id {followed_id} not found"
        )));
    }

    let location = paths::user_path(followed_id);

    if state
        .relationships
        .find_by_pair(user.id, followed_id)
        .await?
        .is_some()
    {
        return visit.redirect(&location).await;
    }

    let relationship = match Relationship::new(user.id, followed_id) {
        Ok(relationship) => relationship,
        Err(DomainError::SelfFollow) => {
            visit.flash(FlashKind::Error, "You cannot follow yourself.");
            return visit.redirect(&location).await;
        }
        Err(e) => return Err(e.into()),
    };

    match state.relationships.save(relationship).await {
        Ok(_) => tracing::info!(follower_id = %user.id, followed_id = %followed_id, "Followed"),
        // Another request created the same edge first.
        Err(RepoError::Constraint(_)) => {}
        Err(e) => return Err(e.into()),
    }

    visit.redirect(&location).await
}

/// DELETE /relationships/{id}
pub async fn destroy(
    req: HttpRequest,
    visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(user) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };

    let id = path.into_inner();
    let relationship = state
        .relationships
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Relationship with id {id} not found")))?;

    if relationship.follower_id != user.id {
        tracing::warn!(user_id = %user.id, relationship_id = %id, "Attempt to remove another user's follow");
        return visit.redirect(&paths::root_path()).await;
    }

    state.relationships.delete(id).await?;
    tracing::info!(follower_id = %user.id, followed_id = %relationship.followed_id, "Unfollowed");

    visit
        .redirect(&paths::user_path(relationship.followed_id))
        .await
}
