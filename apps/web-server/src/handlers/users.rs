//! User handlers: signup, listing, profiles, settings and admin deletion.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use uuid::Uuid;

use sample_core::ValidationErrors;
use sample_core::domain::{User, UserChanges};
use sample_core::error::RepoError;
use sample_core::ports::BaseRepository;
use sample_shared::forms::{PageQuery, UserForm};
use sample_shared::paths;

use crate::middleware::Visit;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::FlashKind;
use crate::state::AppState;
use crate::views;
use crate::views::users::{FollowButton, FollowList, Profile};

const TAKEN: &str = "Email has already been taken";

fn changes(form: &UserForm) -> UserChanges<'_> {
    UserChanges {
        name: &form.name,
        email: &form.email,
        password: &form.password,
        password_confirmation: &form.password_confirmation,
    }
}

/// Add the uniqueness error unless the email belongs to `owner`.
async fn check_email_taken(
    state: &AppState,
    email: &str,
    owner: Option<Uuid>,
    errors: &mut ValidationErrors,
) -> AppResult<()> {
    if email.trim().is_empty() {
        return Ok(());
    }
    if let Some(existing) = state.users.find_by_email(email).await? {
        if Some(existing.id) != owner {
            errors.add(TAKEN);
        }
    }
    Ok(())
}

async fn find_user(state: &AppState, id: Uuid) -> AppResult<User> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))
}

/// The submitted form with the password fields cleared, for re-rendering.
fn redisplay(form: UserForm) -> UserForm {
    UserForm {
        password: String::new(),
        password_confirmation: String::new(),
        ..form
    }
}

/// GET /signup
pub async fn new(visit: Visit) -> AppResult<HttpResponse> {
    if visit.current_user().is_some() {
        return visit.redirect(&paths::root_path()).await;
    }

    let view = views::users::signup(&UserForm::default(), &ValidationErrors::new());
    visit.render(StatusCode::OK, view).await
}

/// POST /users
pub async fn create(
    mut visit: Visit,
    state: web::Data<AppState>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    if visit.current_user().is_some() {
        return visit.redirect(&paths::root_path()).await;
    }

    let form = form.into_inner();
    let mut errors = changes(&form).validate(true);
    check_email_taken(&state, &form.email, None, &mut errors).await?;

    if errors.is_empty() {
        let password_hash = state.passwords.hash(&form.password)?;
        let user = User::new(form.name.trim(), &form.email, password_hash);

        match state.users.save(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User signed up");
                let location = paths::user_path(user.id);
                visit.sign_in(user).await?;
                visit.flash(FlashKind::Success, "Welcome to the Sample App!");
                return visit.redirect(&location).await;
            }
            // Lost a race with another signup for the same email.
            Err(RepoError::Constraint(_)) => errors.add(TAKEN),
            Err(e) => return Err(e.into()),
        }
    }

    let view = views::users::signup(&redisplay(form), &errors);
    visit.render(StatusCode::UNPROCESSABLE_ENTITY, view).await
}

/// GET /users
pub async fn index(
    req: HttpRequest,
    visit: Visit,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    if visit.current_user().is_none() {
        return visit.require_sign_in(&req).await;
    }

    let users = state.users.list(state.page(query.page)).await?;
    let view = views::users::index(&users, visit.current_user());
    visit.render(StatusCode::OK, view).await
}

/// GET /users/{id}
pub async fn show(
    visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let user = find_user(&state, path.into_inner()).await?;

    let follow_button = match visit.current_user() {
        Some(viewer) if viewer.id != user.id => {
            match state.relationships.find_by_pair(viewer.id, user.id).await? {
                Some(relationship) => FollowButton::Unfollow(relationship),
                None => FollowButton::Follow,
            }
        }
        _ => FollowButton::Hidden,
    };

    let profile = Profile {
        microposts: state
            .microposts
            .list_by_user(user.id, state.page(query.page))
            .await?,
        following: state.relationships.count_followed(user.id).await?,
        followers: state.relationships.count_followers(user.id).await?,
        follow_button,
        owned: visit.is_current_user(user.id),
        user,
    };

    visit
        .render(StatusCode::OK, views::users::show(&profile))
        .await
}

/// GET /users/{id}/edit
pub async fn edit(
    req: HttpRequest,
    visit: Visit,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(user) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };
    if user.id != path.into_inner() {
        return visit.redirect(&paths::root_path()).await;
    }

    let form = UserForm {
        name: user.name.clone(),
        email: user.email.clone(),
        ..UserForm::default()
    };
    let view = views::users::edit(&user, &form, &ValidationErrors::new());
    visit.render(StatusCode::OK, view).await
}

/// PATCH/PUT /users/{id}
pub async fn update(
    req: HttpRequest,
    mut visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: web::Form<UserForm>,
) -> AppResult<HttpResponse> {
    let Some(user) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };
    if user.id != path.into_inner() {
        return visit.redirect(&paths::root_path()).await;
    }

    let form = form.into_inner();
    let submitted = changes(&form);
    let mut errors = submitted.validate(false);
    check_email_taken(&state, &form.email, Some(user.id), &mut errors).await?;

    if errors.is_empty() {
        let password_hash = if submitted.changes_password() {
            Some(state.passwords.hash(&form.password)?)
        } else {
            None
        };
        let mut updated = user.clone();
        updated.update_profile(&form.name, &form.email, password_hash);

        match state.users.save(updated).await {
            Ok(updated) => {
                tracing::info!(user_id = %updated.id, "Profile updated");
                visit.flash(FlashKind::Success, "Profile updated");
                return visit.redirect(&paths::user_path(updated.id)).await;
            }
            Err(RepoError::Constraint(_)) => errors.add(TAKEN),
            Err(e) => return Err(e.into()),
        }
    }

    let view = views::users::edit(&user, &redisplay(form), &errors);
    visit.render(StatusCode::UNPROCESSABLE_ENTITY, view).await
}

/// DELETE /users/{id}
pub async fn destroy(
    req: HttpRequest,
    mut visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let Some(admin) = visit.current_user().cloned() else {
        return visit.require_sign_in(&req).await;
    };
    if !admin.admin {
        tracing::warn!(user_id = %admin.id, "Non-admin attempted to delete a user");
        return visit.redirect(&paths::root_path()).await;
    }

    let id = path.into_inner();
    if id == admin.id {
        visit.flash(FlashKind::Error, "Admins cannot delete themselves.");
        return visit.redirect(&paths::users_path()).await;
    }

    state.users.delete(id).await?;
    tracing::info!(admin_id = %admin.id, user_id = %id, "User destroyed");

    visit.flash(FlashKind::Success, "User destroyed.");
    visit.redirect(&paths::users_path()).await
}

/// GET /users/{id}/following
pub async fn following(
    req: HttpRequest,
    visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    if visit.current_user().is_none() {
        return visit.require_sign_in(&req).await;
    }

    let user = find_user(&state, path.into_inner()).await?;
    let users = state
        .relationships
        .followed_users(user.id, state.page(query.page))
        .await?;
    let listing_path = paths::following_user_path(user.id);
    let list = follow_list(&state, "Following", user, users, listing_path).await?;

    visit
        .render(StatusCode::OK, views::users::follow_list(&list))
        .await
}

/// GET /users/{id}/followers
pub async fn followers(
    req: HttpRequest,
    visit: Visit,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    if visit.current_user().is_none() {
        return visit.require_sign_in(&req).await;
    }

    let user = find_user(&state, path.into_inner()).await?;
    let users = state
        .relationships
        .followers(user.id, state.page(query.page))
        .await?;
    let listing_path = paths::followers_user_path(user.id);
    let list = follow_list(&state, "Followers", user, users, listing_path).await?;

    visit
        .render(StatusCode::OK, views::users::follow_list(&list))
        .await
}

async fn follow_list(
    state: &AppState,
    heading: &'static str,
    user: User,
    users: sample_core::Page<User>,
    path: String,
) -> AppResult<FollowList> {
    Ok(FollowList {
        heading,
        micropost_count: state.microposts.count_by_user(user.id).await?,
        following: state.relationships.count_followed(user.id).await?,
        followers: state.relationships.count_followers(user.id).await?,
        path,
        users,
        user,
    })
}
