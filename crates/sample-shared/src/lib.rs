//! # Sample Shared
//!
//! Types shared between the server and anything that builds URLs or forms
//! for it: the route table with its path helpers, and the form payloads.

pub mod forms;
pub mod routes;

pub use routes::{Action, ROUTES, Route, Verb, path_for, paths, recognize};
