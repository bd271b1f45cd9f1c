//! # Station Registry
//!
//! Registry of EV charging stations: station records, status workflow,
//! search, in-memory filtering and statistics, gated by a per-session
//! access mode.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Station and user entities, store interfaces
//! - **application**: Registry service, filter engine, authentication, sessions
//! - **infrastructure**: SeaORM and in-memory stores, password hashing
//! - **shared**: Error taxonomy and input validation
//! - **config** / **telemetry**: TOML configuration and tracing setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use application::{
    AccessMode, AuthService, Session, SessionRequest, StationFilter, StationRegistryService,
    StationSnapshot, StationStatistics,
};
pub use domain::{DomainError, DomainResult, RepositoryProvider, Station, StationStatus};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};
