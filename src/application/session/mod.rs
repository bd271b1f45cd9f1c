//! Session and access mode gate.
//!
//! A session is opened once, either from verified credentials (Administrator)
//! or an explicit guest choice (Guest), and its mode never changes afterwards.
//! Moving from Guest to Administrator ends the session and opens a new one
//! (see [`crate::application::identity::AuthService::restart_as_admin`]).

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Capability level of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessMode {
    /// Full create/update/delete access
    Administrator,
    /// Read-only: view, search, filter, statistics
    Guest,
}

impl AccessMode {
    pub fn can_mutate(&self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Administrator => write!(f, "Administrator"),
            Self::Guest => write!(f, "Guest"),
        }
    }
}

/// How the caller wants to start a session
#[derive(Debug, Clone)]
pub enum SessionRequest {
    Credentials { username: String, password: String },
    Guest,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    id: Uuid,
    mode: AccessMode,
    username: Option<String>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn guest() -> Self {
        Self::open(AccessMode::Guest, None)
    }

    /// Only reachable through credential verification.
    pub(crate) fn administrator(username: impl Into<String>) -> Self {
        Self::open(AccessMode::Administrator, Some(username.into()))
    }

    fn open(mode: AccessMode, username: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            username,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Gate for create, update, update_status and delete.
    pub fn ensure_can_mutate(&self, operation: &'static str) -> DomainResult<()> {
        if self.mode.can_mutate() {
            Ok(())
        } else {
            Err(DomainError::Forbidden { operation })
        }
    }

    /// Ends the session. Consuming it makes the end of its lifetime explicit.
    pub fn end(self) -> Uuid {
        self.id
    }
}
