//! Authentication implementations.

mod password;

pub use password::{Argon2PasswordService, PasswordConfig};
