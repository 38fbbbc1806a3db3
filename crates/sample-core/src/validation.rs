//! Attribute validation shared by the domain entities.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

/// Full error messages collected while validating a record.
///
/// Messages are kept in the order they were added, which is the order the
/// error summary lists them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn count(&self) -> usize {
        self.messages.len()
    }

    pub fn full_messages(&self) -> &[String] {
        &self.messages
    }

    /// Ok when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub(crate) fn presence(&mut self, attribute: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(format!("{attribute} can't be blank"));
            false
        } else {
            true
        }
    }

    pub(crate) fn maximum(&mut self, attribute: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(format!(
                "{attribute} is too long (maximum is {max} characters)"
            ));
        }
    }

    pub(crate) fn minimum(&mut self, attribute: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.add(format!(
                "{attribute} is too short (minimum is {min} characters)"
            ));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

lazy_static! {
    /// Word characters, `+`, `-` or `.` before the `@`; an alphabetic final
    /// label after it. ASCII only, case-insensitive.
    static ref VALID_EMAIL: Regex = Regex::new(r"(?i-u)\A[\w+\-.]+@[a-z\d\-.]+\.[a-z]+\z")
        .expect("email pattern is valid");
}

pub fn is_valid_email(email: &str) -> bool {
    VALID_EMAIL.is_match(email)
}
