//! View models for the partials in `macros.html`.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use sample_core::domain::{Micropost, Relationship, User};
use sample_core::pagination::Page;
use sample_shared::paths;

use super::time_ago_in_words;

/// A user's name linking to their profile.
#[derive(Debug, Serialize)]
pub struct UserLink {
    pub name: String,
    pub href: String,
}

impl From<&User> for UserLink {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            href: paths::user_path(user.id),
        }
    }
}

/// A user in a listing.
#[derive(Debug, Serialize)]
pub struct UserItem {
    pub name: String,
    pub href: String,
    pub delete_href: Option<String>,
}

/// Admins get a delete link on everyone but themselves.
pub fn user_item(user: &User, viewer: Option<&User>) -> UserItem {
    let deletable = viewer.is_some_and(|v| v.admin && v.id != user.id);
    UserItem {
        name: user.name.clone(),
        href: paths::user_path(user.id),
        delete_href: deletable.then(|| paths::user_path(user.id)),
    }
}

pub fn user_items(page: &Page<User>, viewer: Option<&User>) -> Vec<UserItem> {
    page.items.iter().map(|user| user_item(user, viewer)).collect()
}

#[derive(Debug, Serialize)]
pub struct PostItem {
    pub id: Uuid,
    pub content: String,
    pub author: Option<UserLink>,
    pub posted_ago: String,
    pub delete_href: Option<String>,
}

/// One micropost. `author` adds a profile link, as in the feed.
pub fn micropost_item(micropost: &Micropost, author: Option<&User>, deletable: bool) -> PostItem {
    PostItem {
        id: micropost.id,
        content: micropost.content.clone(),
        author: author.map(UserLink::from),
        posted_ago: time_ago_in_words(micropost.created_at, Utc::now()),
        delete_href: deletable.then(|| paths::micropost_path(micropost.id)),
    }
}

/// Following / followers counts linking to the two listings.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub following: u64,
    pub followers: u64,
    pub following_href: String,
    pub followers_href: String,
}

pub fn stats(user_id: Uuid, following: u64, followers: u64) -> Stats {
    Stats {
        following,
        followers,
        following_href: paths::following_user_path(user_id),
        followers_href: paths::followers_user_path(user_id),
    }
}

#[derive(Debug, Serialize)]
pub struct PageLink {
    pub number: u64,
    /// None for the current page.
    pub href: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub previous: Option<String>,
    pub next: Option<String>,
    pub pages: Vec<PageLink>,
}

/// Previous / numbered / Next links. None for a single page.
pub fn pagination<T>(page: &Page<T>, path: &str) -> Option<Pagination> {
    let total_pages = page.total_pages();
    if total_pages <= 1 {
        return None;
    }

    // A page past the end steps back to the last real one.
    let previous = page
        .has_previous()
        .then(|| paths::paged(path, (page.page - 1).min(total_pages)));
    let next = page.has_next().then(|| paths::paged(path, page.page + 1));
    let pages = (1..=total_pages)
        .map(|number| PageLink {
            number,
            href: (number != page.page).then(|| paths::paged(path, number)),
        })
        .collect();

    Some(Pagination {
        previous,
        next,
        pages,
    })
}

/// Follow button, or Unfollow when `relationship` is the viewer's edge.
#[derive(Debug, Serialize)]
pub struct FollowForm {
    pub unfollow: bool,
    pub action: String,
    pub followed_id: Option<Uuid>,
}

pub fn follow_form(target: &User, relationship: Option<&Relationship>) -> FollowForm {
    match relationship {
        Some(relationship) => FollowForm {
            unfollow: true,
            action: format!("{}?_method=delete", paths::relationship_path(relationship.id)),
            followed_id: None,
        },
        None => FollowForm {
            unfollow: false,
            action: paths::relationships_path(),
            followed_id: Some(target.id),
        },
    }
}
