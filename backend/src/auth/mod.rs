//! Authentication module
//!
//! Session-cookie authentication with bcrypt password hashing and
//! database-backed opaque session tokens.

pub mod cookie;
mod error;
mod middleware;
mod password;
mod token;
mod validator;

pub use error::{AuthError, EntropyError, HashingError};
pub use middleware::{require_session, AuthUser};
pub use password::PasswordService;
pub use token::TokenGenerator;
pub use validator::SessionValidator;
