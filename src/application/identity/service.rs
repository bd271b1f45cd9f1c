//! Authentication service: credential checks and session opening
//!
//! Passwords are stored as bcrypt hashes and verified with
//! [`verify_password`]; plain-text comparison never happens.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::session::{Session, SessionRequest};
use crate::config::DEFAULT_ADMIN_PASSWORD;
use crate::domain::{CreateUserDto, DomainError, DomainResult, RepositoryProvider};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Returned when a Guest → Administrator restart fails; hands the old session back.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SessionRestartError {
    pub session: Session,
    pub error: DomainError,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Authentication ──────────────────────────────────────────

    /// `true` iff the user exists and the password matches its stored hash.
    ///
    /// Blank usernames, empty passwords, unknown users and mismatches are all
    /// `Ok(false)`. Only store failures are errors.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<bool> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Ok(false);
        }

        let Some(user) = self.repos.users().find_by_username(username).await? else {
            return Ok(false);
        };

        match verify_password(password, &user.password_hash) {
            Ok(valid) => Ok(valid),
            Err(e) => {
                warn!(username, error = %e, "Stored password hash is unreadable");
                Ok(false)
            }
        }
    }

    // ── Sessions ────────────────────────────────────────────────

    pub async fn open_session(&self, request: SessionRequest) -> DomainResult<Session> {
        match request {
            SessionRequest::Guest => {
                let session = Session::guest();
                info!(session_id = %session.id(), "Guest session started");
                Ok(session)
            }
            SessionRequest::Credentials { username, password } => {
                if !self.authenticate(&username, &password).await? {
                    return Err(DomainError::Unauthorized("Invalid credentials".into()));
                }
                let session = Session::administrator(username.trim());
                info!(
                    session_id = %session.id(),
                    username = session.username().unwrap_or_default(),
                    "Administrator session started"
                );
                Ok(session)
            }
        }
    }

    /// End `current` and open a fresh Administrator session.
    ///
    /// On failure `current` is returned untouched inside the error.
    pub async fn restart_as_admin(
        &self,
        current: Session,
        username: &str,
        password: &str,
    ) -> Result<Session, SessionRestartError> {
        let request = SessionRequest::Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.open_session(request).await {
            Ok(next) => {
                let ended = current.end();
                info!(ended = %ended, started = %next.id(), "Session restarted as administrator");
                Ok(next)
            }
            Err(error) => Err(SessionRestartError {
                session: current,
                error,
            }),
        }
    }

    // ── Seeding ─────────────────────────────────────────────────

    /// Create the first administrator when no users exist.
    ///
    /// Returns `true` when an account was created.
    pub async fn ensure_admin_account(&self, username: &str, password: &str) -> DomainResult<bool> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::invalid_input(
                "create_user",
                "administrator username and password must not be empty",
            ));
        }

        if self.repos.users().count_users().await? > 0 {
            return Ok(false);
        }

        let password_hash = hash_password(password).map_err(|e| {
            DomainError::invalid_input("create_user", format!("Failed to hash password: {}", e))
        })?;

        let user = self
            .repos
            .users()
            .create_user(CreateUserDto {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "Default administrator created");
        if password == DEFAULT_ADMIN_PASSWORD {
            warn!(
                username = %user.username,
                "Administrator uses the default password, change it in the [admin] config section"
            );
        }
        Ok(true)
    }
}
