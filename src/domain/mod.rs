//! Domain layer: entities, value types and store interfaces.

pub mod repositories;
pub mod station;
pub mod user;

pub use repositories::{DomainResult, RepositoryProvider};
pub use station::{Station, StationRepository, StationStatus};
pub use user::{CreateUserDto, User, UserRepository};

pub use crate::shared::errors::DomainError;
