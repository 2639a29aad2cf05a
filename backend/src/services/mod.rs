//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod auth;
pub mod words;

pub use auth::{AuthService, IssuedSession};
pub use words::WordBank;
