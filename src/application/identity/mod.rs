//! Identity module: credential verification & session opening
//!
//! Contains the `AuthService`, which decides the access mode a session
//! starts in.

pub mod service;

pub use service::{AuthService, SessionRestartError};
