//! Request specs for the HTML pages, driven through [`support::Browser`].

mod authentication;
mod static_pages;
mod support;
mod user;
