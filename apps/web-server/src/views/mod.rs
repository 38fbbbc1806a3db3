//! HTML views.
//!
//! Pages are Tera templates compiled into the binary. Each view function
//! returns a [`View`]: a template name, a page title and the context the
//! template reads. [`render`] adds what the layout needs and autoescapes
//! every interpolated value.

pub mod pages;
pub mod sessions;
pub mod shared;
pub mod users;

use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Serialize;
use tera::{Context, Tera};

use sample_core::domain::User;
use sample_shared::paths;

use crate::middleware::session::Flash;

pub const BASE_TITLE: &str = "Sample App";

const TEMPLATE_SOURCES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("macros.html", include_str!("../../templates/macros.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("pages/welcome.html", include_str!("../../templates/pages/welcome.html")),
    ("pages/home.html", include_str!("../../templates/pages/home.html")),
    ("pages/help.html", include_str!("../../templates/pages/help.html")),
    ("pages/about.html", include_str!("../../templates/pages/about.html")),
    ("pages/contact.html", include_str!("../../templates/pages/contact.html")),
    ("pages/not_found.html", include_str!("../../templates/pages/not_found.html")),
    ("sessions/new.html", include_str!("../../templates/sessions/new.html")),
    ("users/new.html", include_str!("../../templates/users/new.html")),
    ("users/edit.html", include_str!("../../templates/users/edit.html")),
    ("users/index.html", include_str!("../../templates/users/index.html")),
    ("users/show.html", include_str!("../../templates/users/show.html")),
    ("users/follow.html", include_str!("../../templates/users/follow.html")),
];

lazy_static! {
    pub static ref TEMPLATES: Tera = {
        let mut tera = Tera::default();
        match tera.add_raw_templates(TEMPLATE_SOURCES.iter().copied()) {
            Ok(()) => tera,
            Err(e) => {
                tracing::error!("Parsing error(s): {}", e);
                std::process::exit(1);
            }
        }
    };
}

/// A template ready to render inside the site layout.
pub struct View {
    template: &'static str,
    title: String,
    context: Context,
}

impl View {
    pub fn new(template: &'static str, title: impl Into<String>) -> Self {
        Self {
            template,
            title: title.into(),
            context: Context::new(),
        }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }
}

/// Paths the layout and forms link to.
#[derive(Serialize)]
struct Links {
    root: String,
    help: String,
    about: String,
    contact: String,
    signup: String,
    signin: String,
    signout: String,
    users: String,
    sessions: String,
    microposts: String,
}

impl Links {
    fn new() -> Self {
        Self {
            root: paths::root_path(),
            help: paths::help_path(),
            about: paths::about_path(),
            contact: paths::contact_path(),
            signup: paths::signup_path(),
            signin: paths::signin_path(),
            signout: paths::signout_path(),
            users: paths::users_path(),
            sessions: paths::sessions_path(),
            microposts: paths::microposts_path(),
        }
    }
}

/// The signed-in user as the header shows them.
#[derive(Serialize)]
struct NavUser {
    name: String,
    href: String,
    settings_href: String,
}

impl From<&User> for NavUser {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            href: paths::user_path(user.id),
            settings_href: paths::edit_user_path(user.id),
        }
    }
}

/// "Sample App | About", or just "Sample App" for an empty page title.
pub fn full_title(page_title: &str) -> String {
    if page_title.is_empty() {
        BASE_TITLE.to_string()
    } else {
        format!("{BASE_TITLE} | {page_title}")
    }
}

/// "1 micropost", "2 microposts".
pub fn pluralize(count: u64, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

/// Rough distance between two instants, in words.
pub fn time_ago_in_words(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        pluralize(minutes as u64, "minute")
    } else if hours < 24 {
        format!("about {}", pluralize(hours.max(1) as u64, "hour"))
    } else if days < 30 {
        pluralize(days as u64, "day")
    } else if days < 365 {
        pluralize((days / 30) as u64, "month")
    } else {
        format!("about {}", pluralize((days / 365) as u64, "year"))
    }
}

/// Render `view` inside the site layout: title, header navigation and flashes.
pub fn render(
    view: View,
    current_user: Option<&User>,
    flashes: &[Flash],
) -> Result<String, tera::Error> {
    let View {
        template,
        title,
        mut context,
    } = view;
    context.insert("title", &full_title(&title));
    context.insert("links", &Links::new());
    context.insert("current_user", &current_user.map(NavUser::from));
    context.insert("flashes", flashes);
    TEMPLATES.render(template, &context)
}

/// Standalone page for errors raised outside a [`crate::middleware::Visit`].
pub fn error_page(status: StatusCode, detail: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    let view = View::new("error.html", reason)
        .with("heading", reason)
        .with("detail", detail);

    render(view, None, &[]).unwrap_or_else(|e| {
        tracing::error!("Failed to render error page: {}", e);
        format!(
            "<h1>{}</h1>\n<p>{}</p>\n",
            html_escape::encode_text(reason),
            html_escape::encode_text(detail)
        )
    })
}
