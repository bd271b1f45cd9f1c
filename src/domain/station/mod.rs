//! Station aggregate
//!
//! Contains the Station entity, its status enumeration, and the store interface.

pub mod model;
pub mod repository;

pub use model::{Station, StationStatus};
pub use repository::StationRepository;
