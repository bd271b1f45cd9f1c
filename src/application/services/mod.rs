//! Application services

mod station_registry;

pub use station_registry::StationRegistryService;
