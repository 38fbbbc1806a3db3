//! Home and static pages.

use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};

use sample_core::ValidationErrors;
use sample_core::domain::User;
use sample_shared::forms::PageQuery;

use crate::middleware::Visit;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;
use crate::views::pages::{Dashboard, FeedItem};

/// GET / and /home
pub async fn home(
    visit: Visit,
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    match visit.current_user().cloned() {
        Some(user) => {
            let dashboard = dashboard(&state, user, query.page).await?;
            let view = views::pages::home(&dashboard, "", &ValidationErrors::new());
            visit.render(StatusCode::OK, view).await
        }
        None => visit.render(StatusCode::OK, views::pages::welcome()).await,
    }
}

/// Load the signed-in home page: counts plus one page of the feed.
pub(crate) async fn dashboard(
    state: &AppState,
    user: User,
    page: Option<u64>,
) -> AppResult<Dashboard> {
    let feed = state.microposts.feed(user.id, state.page(page)).await?;

    let mut author_ids: Vec<_> = feed.items.iter().map(|m| m.user_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();
    let authors = state.users.find_many(&author_ids).await?;

    let feed = feed.map(|micropost| {
        let author = authors.iter().find(|a| a.id == micropost.user_id).cloned();
        FeedItem { micropost, author }
    });

    Ok(Dashboard {
        micropost_count: state.microposts.count_by_user(user.id).await?,
        following: state.relationships.count_followed(user.id).await?,
        followers: state.relationships.count_followers(user.id).await?,
        feed,
        user,
    })
}

/// GET /help
pub async fn help(visit: Visit) -> AppResult<HttpResponse> {
    visit.render(StatusCode::OK, views::pages::help()).await
}

/// GET /about
pub async fn about(visit: Visit) -> AppResult<HttpResponse> {
    visit.render(StatusCode::OK, views::pages::about()).await
}

/// GET /contact
pub async fn contact(visit: Visit) -> AppResult<HttpResponse> {
    visit.render(StatusCode::OK, views::pages::contact()).await
}

/// Anything the route table does not know.
pub async fn not_found(req: HttpRequest, visit: Visit) -> AppResult<HttpResponse> {
    tracing::debug!(method = %req.method(), path = %req.path(), "No route matched");
    visit
        .render(StatusCode::NOT_FOUND, views::pages::not_found(req.path()))
        .await
}
