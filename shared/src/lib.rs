//! Werd Shared Library
//!
//! Types, models, and validation helpers shared between the backend
//! and anything that talks to it.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{Account, Session, SessionState};
pub use types::*;
