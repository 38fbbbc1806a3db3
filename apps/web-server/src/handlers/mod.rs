//! HTTP handlers and route configuration.
//!
//! Routes come from the shared route table, so the paths the views link
//! to and the paths registered here cannot drift apart.

mod microposts;
mod pages;
mod relationships;
mod sessions;
mod users;

use actix_web::{Route, web};

use sample_shared::{Action, ROUTES, Verb};

fn method(verb: Verb) -> Route {
    match verb {
        Verb::Get => web::get(),
        Verb::Post => web::post(),
        Verb::Patch => web::patch(),
        Verb::Put => web::put(),
        Verb::Delete => web::delete(),
    }
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for route in ROUTES {
        let method = method(route.verb);
        let handler = match route.action {
            Action::PagesHome => method.to(pages::home),
            Action::PagesAbout => method.to(pages::about),
            Action::PagesContact => method.to(pages::contact),
            Action::PagesHelp => method.to(pages::help),
            Action::UsersIndex => method.to(users::index),
            Action::UsersNew => method.to(users::new),
            Action::UsersCreate => method.to(users::create),
            Action::UsersShow => method.to(users::show),
            Action::UsersEdit => method.to(users::edit),
            Action::UsersUpdate => method.to(users::update),
            Action::UsersDestroy => method.to(users::destroy),
            Action::UsersFollowing => method.to(users::following),
            Action::UsersFollowers => method.to(users::followers),
            Action::SessionsNew => method.to(sessions::new),
            Action::SessionsCreate => method.to(sessions::create),
            Action::SessionsDestroy => method.to(sessions::destroy),
            Action::MicropostsCreate => method.to(microposts::create),
            Action::MicropostsDestroy => method.to(microposts::destroy),
            Action::RelationshipsCreate => method.to(relationships::create),
            Action::RelationshipsDestroy => method.to(relationships::destroy),
        };
        tracing::trace!(
            verb = %route.verb,
            pattern = route.pattern,
            action = %route.action,
            "Route registered"
        );
        cfg.route(route.pattern, handler);
    }

    cfg.default_service(web::to(pages::not_found));
}
