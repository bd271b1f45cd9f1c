pub mod identity;
pub mod queries;
pub mod services;
pub mod session;

// Re-export key types for convenience
pub use identity::{AuthService, SessionRestartError};
pub use queries::{filter_stations, StationFilter, StationSnapshot, StationStatistics};
pub use services::StationRegistryService;
pub use session::{AccessMode, Session, SessionRequest};
