//! The route table.
//!
//! Every URL the application answers is listed once in [`ROUTES`]. The
//! server registers its handlers from this table and links, forms and tests
//! build URLs through [`path_for`] and the [`paths`] helpers, so no path
//! string is spelled out anywhere else.

use std::fmt;

/// HTTP verbs the application routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    /// Case-insensitive, as used by the `_method` override parameter.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PATCH" => Some(Verb::Patch),
            "PUT" => Some(Verb::Put),
            "DELETE" => Some(Verb::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named logical actions, displayed as `controller#action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PagesHome,
    PagesAbout,
    PagesContact,
    PagesHelp,
    UsersIndex,
    UsersNew,
    UsersCreate,
    UsersShow,
    UsersEdit,
    UsersUpdate,
    UsersDestroy,
    UsersFollowing,
    UsersFollowers,
    SessionsNew,
    SessionsCreate,
    SessionsDestroy,
    MicropostsCreate,
    MicropostsDestroy,
    RelationshipsCreate,
    RelationshipsDestroy,
}

impl Action {
    pub fn controller(&self) -> &'static str {
        match self {
            Action::PagesHome | Action::PagesAbout | Action::PagesContact | Action::PagesHelp => {
                "pages"
            }
            Action::UsersIndex
            | Action::UsersNew
            | Action::UsersCreate
            | Action::UsersShow
            | Action::UsersEdit
            | Action::UsersUpdate
            | Action::UsersDestroy
            | Action::UsersFollowing
            | Action::UsersFollowers => "users",
            Action::SessionsNew | Action::SessionsCreate | Action::SessionsDestroy => "sessions",
            Action::MicropostsCreate | Action::MicropostsDestroy => "microposts",
            Action::RelationshipsCreate | Action::RelationshipsDestroy => "relationships",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::PagesHome => "home",
            Action::PagesAbout => "about",
            Action::PagesContact => "contact",
            Action::PagesHelp => "help",
            Action::UsersIndex => "index",
            Action::UsersNew | Action::SessionsNew => "new",
            Action::UsersCreate
            | Action::SessionsCreate
            | Action::MicropostsCreate
            | Action::RelationshipsCreate => "create",
            Action::UsersShow => "show",
            Action::UsersEdit => "edit",
            Action::UsersUpdate => "update",
            Action::UsersDestroy
            | Action::SessionsDestroy
            | Action::MicropostsDestroy
            | Action::RelationshipsDestroy => "destroy",
            Action::UsersFollowing => "following",
            Action::UsersFollowers => "followers",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller(), self.name())
    }
}

/// One row of the route table. `{id}` marks the member segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub verb: Verb,
    pub pattern: &'static str,
    pub action: Action,
}

impl Route {
    const fn new(verb: Verb, pattern: &'static str, action: Action) -> Self {
        Self {
            verb,
            pattern,
            action,
        }
    }
}

pub const ROUTES: &[Route] = &[
    // Content pages
    Route::new(Verb::Get, "/", Action::PagesHome),
    Route::new(Verb::Get, "/home", Action::PagesHome),
    Route::new(Verb::Get, "/about", Action::PagesAbout),
    Route::new(Verb::Get, "/contact", Action::PagesContact),
    Route::new(Verb::Get, "/help", Action::PagesHelp),
    // Users
    Route::new(Verb::Get, "/signup", Action::UsersNew),
    Route::new(Verb::Get, "/users", Action::UsersIndex),
    // Ahead of the member route so `new` is not read as an id.
    Route::new(Verb::Get, "/users/new", Action::UsersNew),
    Route::new(Verb::Post, "/users", Action::UsersCreate),
    Route::new(Verb::Get, "/users/{id}", Action::UsersShow),
    Route::new(Verb::Get, "/users/{id}/edit", Action::UsersEdit),
    Route::new(Verb::Patch, "/users/{id}", Action::UsersUpdate),
    Route::new(Verb::Put, "/users/{id}", Action::UsersUpdate),
    Route::new(Verb::Delete, "/users/{id}", Action::UsersDestroy),
    Route::new(Verb::Get, "/users/{id}/following", Action::UsersFollowing),
    Route::new(Verb::Get, "/users/{id}/followers", Action::UsersFollowers),
    // Sessions
    Route::new(Verb::Get, "/signin", Action::SessionsNew),
    Route::new(Verb::Post, "/sessions", Action::SessionsCreate),
    Route::new(Verb::Delete, "/signout", Action::SessionsDestroy),
    // Microposts
    Route::new(Verb::Post, "/microposts", Action::MicropostsCreate),
    Route::new(Verb::Delete, "/microposts/{id}", Action::MicropostsDestroy),
    // Relationships
    Route::new(Verb::Post, "/relationships", Action::RelationshipsCreate),
    Route::new(Verb::Delete, "/relationships/{id}", Action::RelationshipsDestroy),
];

const ID_SEGMENT: &str = "{id}";

/// A request path resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub action: Action,
    pub id: Option<String>,
}

/// Resolve a concrete request path. The query string is ignored.
pub fn recognize(verb: Verb, path: &str) -> Option<Recognized> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments = split_segments(path);

    ROUTES
        .iter()
        .filter(|route| route.verb == verb)
        .find_map(|route| {
            let pattern = split_segments(route.pattern);
            if pattern.len() != segments.len() {
                return None;
            }

            let mut id = None;
            for (expected, actual) in pattern.iter().zip(&segments) {
                if *expected == ID_SEGMENT {
                    id = Some((*actual).to_string());
                } else if expected != actual {
                    return None;
                }
            }

            Some(Recognized {
                action: route.action,
                id,
            })
        })
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Build the path of `action`, substituting `id` into the member segment.
///
/// The first table row for an action wins, so `PagesHome` is `/`.
pub fn path_for(action: Action, id: Option<&str>) -> String {
    let pattern = ROUTES
        .iter()
        .find(|route| route.action == action)
        .map(|route| route.pattern)
        .unwrap_or("/");

    match id {
        Some(id) => pattern.replace(ID_SEGMENT, id),
        None => pattern.to_string(),
    }
}

/// Named path helpers.
pub mod paths {
    use std::fmt::Display;

    use super::{Action, path_for};

    fn member(action: Action, id: impl Display) -> String {
        path_for(action, Some(&id.to_string()))
    }

    pub fn root_path() -> String {
        path_for(Action::PagesHome, None)
    }

    pub fn about_path() -> String {
        path_for(Action::PagesAbout, None)
    }

    pub fn contact_path() -> String {
        path_for(Action::PagesContact, None)
    }

    pub fn help_path() -> String {
        path_for(Action::PagesHelp, None)
    }

    pub fn signup_path() -> String {
        path_for(Action::UsersNew, None)
    }

    pub fn signin_path() -> String {
        path_for(Action::SessionsNew, None)
    }

    pub fn signout_path() -> String {
        path_for(Action::SessionsDestroy, None)
    }

    pub fn sessions_path() -> String {
        path_for(Action::SessionsCreate, None)
    }

    pub fn users_path() -> String {
        path_for(Action::UsersIndex, None)
    }

    pub fn user_path(id: impl Display) -> String {
        member(Action::UsersShow, id)
    }

    pub fn edit_user_path(id: impl Display) -> String {
        member(Action::UsersEdit, id)
    }

    pub fn following_user_path(id: impl Display) -> String {
        member(Action::UsersFollowing, id)
    }

    pub fn followers_user_path(id: impl Display) -> String {
        member(Action::UsersFollowers, id)
    }

    pub fn microposts_path() -> String {
        path_for(Action::MicropostsCreate, None)
    }

    pub fn micropost_path(id: impl Display) -> String {
        member(Action::MicropostsDestroy, id)
    }

    pub fn relationships_path() -> String {
        path_for(Action::RelationshipsCreate, None)
    }

    pub fn relationship_path(id: impl Display) -> String {
        member(Action::RelationshipsDestroy, id)
    }

    /// `path` on the given listing page.
    pub fn paged(path: &str, page: u64) -> String {
        format!("{path}?page={page}")
    }
}
