//! Home and static pages.

use sample_core::ValidationErrors;
use sample_core::domain::{Micropost, User};
use sample_core::pagination::Page;
use sample_shared::paths;

use super::View;
use super::shared::{PostItem, UserLink, micropost_item, pagination, stats};

/// A feed entry with its author, when the author could be loaded.
pub struct FeedItem {
    pub micropost: Micropost,
    pub author: Option<User>,
}

/// Everything the signed-in home page shows.
pub struct Dashboard {
    pub user: User,
    pub micropost_count: u64,
    pub following: u64,
    pub followers: u64,
    pub feed: Page<FeedItem>,
}

pub fn welcome() -> View {
    View::new("pages/welcome.html", "")
}

/// Signed-in home: micropost form beside the feed. `draft` refills the
/// form after a failed post.
pub fn home(dashboard: &Dashboard, draft: &str, errors: &ValidationErrors) -> View {
    let user = &dashboard.user;
    let feed: Vec<PostItem> = dashboard
        .feed
        .items
        .iter()
        .map(|item| {
            let own = item.micropost.user_id == user.id;
            micropost_item(&item.micropost, item.author.as_ref(), own)
        })
        .collect();

    View::new("pages/home.html", "")
        .with("user", &UserLink::from(user))
        .with("micropost_count", &dashboard.micropost_count)
        .with("stats", &stats(user.id, dashboard.following, dashboard.followers))
        .with("errors", errors.full_messages())
        .with("draft", draft)
        .with("feed", &feed)
        .with("pagination", &pagination(&dashboard.feed, &paths::root_path()))
}

pub fn help() -> View {
    View::new("pages/help.html", "Help")
}

pub fn about() -> View {
    View::new("pages/about.html", "About Us")
}

pub fn contact() -> View {
    View::new("pages/contact.html", "Contact")
}

pub fn not_found(path: &str) -> View {
    View::new("pages/not_found.html", "Not Found").with("path", path)
}
