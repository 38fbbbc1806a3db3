//! Middleware modules.

pub mod error;
pub mod method_override;
pub mod session;
pub mod visit;

pub use method_override::MethodOverride;
pub use visit::Visit;
