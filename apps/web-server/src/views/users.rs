//! User pages: signup, settings, index, profile and follow listings.

use serde::Serialize;

use sample_core::ValidationErrors;
use sample_core::domain::{Micropost, Relationship, User};
use sample_core::pagination::Page;
use sample_shared::forms::UserForm;
use sample_shared::paths;

use super::View;
use super::shared::{
    PostItem, UserLink, follow_form, micropost_item, pagination, stats, user_items,
};

/// What the profile shows under the stats for the viewer.
pub enum FollowButton {
    /// Signed out, or looking at their own profile.
    Hidden,
    Follow,
    Unfollow(Relationship),
}

pub struct Profile {
    pub user: User,
    pub microposts: Page<Micropost>,
    pub following: u64,
    pub followers: u64,
    pub follow_button: FollowButton,
    /// The viewer may delete the listed microposts.
    pub owned: bool,
}

/// A user's followed users or followers.
pub struct FollowList {
    pub heading: &'static str,
    pub user: User,
    pub micropost_count: u64,
    pub following: u64,
    pub followers: u64,
    pub users: Page<User>,
    pub path: String,
}

/// Values refilled into the user form. Passwords are never echoed back.
#[derive(Serialize)]
struct FormValues<'a> {
    name: &'a str,
    email: &'a str,
}

impl<'a> From<&'a UserForm> for FormValues<'a> {
    fn from(form: &'a UserForm) -> Self {
        Self {
            name: &form.name,
            email: &form.email,
        }
    }
}

pub fn signup(form: &UserForm, errors: &ValidationErrors) -> View {
    View::new("users/new.html", "Signup")
        .with("form", &FormValues::from(form))
        .with("errors", errors.full_messages())
}

pub fn edit(user: &User, form: &UserForm, errors: &ValidationErrors) -> View {
    View::new("users/edit.html", "Edit user")
        .with("action", &format!("{}?_method=patch", paths::user_path(user.id)))
        .with("form", &FormValues::from(form))
        .with("errors", errors.full_messages())
}

pub fn index(users: &Page<User>, viewer: Option<&User>) -> View {
    View::new("users/index.html", "All users")
        .with("users", &user_items(users, viewer))
        .with("pagination", &pagination(users, &paths::users_path()))
}

pub fn show(profile: &Profile) -> View {
    let user = &profile.user;
    let follow = match &profile.follow_button {
        FollowButton::Hidden => None,
        FollowButton::Follow => Some(follow_form(user, None)),
        FollowButton::Unfollow(relationship) => Some(follow_form(user, Some(relationship))),
    };
    let microposts: Vec<PostItem> = profile
        .microposts
        .items
        .iter()
        .map(|micropost| micropost_item(micropost, None, profile.owned))
        .collect();

    View::new("users/show.html", user.name.clone())
        .with("user", &UserLink::from(user))
        .with("stats", &stats(user.id, profile.following, profile.followers))
        .with("follow", &follow)
        .with("microposts_total", &profile.microposts.total)
        .with("microposts", &microposts)
        .with(
            "pagination",
            &pagination(&profile.microposts, &paths::user_path(user.id)),
        )
}

pub fn follow_list(list: &FollowList) -> View {
    let user = &list.user;
    View::new("users/follow.html", list.heading)
        .with("heading", list.heading)
        .with("user", &UserLink::from(user))
        .with("micropost_count", &list.micropost_count)
        .with("stats", &stats(user.id, list.following, list.followers))
        .with("users", &user_items(&list.users, None))
        .with("pagination", &pagination(&list.users, &list.path))
}
