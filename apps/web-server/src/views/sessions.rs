//! Sign-in page.

use super::View;

/// Sign-in form; `email` refills the field after a failed attempt.
pub fn signin(email: &str) -> View {
    View::new("sessions/new.html", "Sign in").with("email", email)
}
