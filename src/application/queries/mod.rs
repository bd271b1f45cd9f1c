//! Read-side helpers over loaded station snapshots.

pub mod filter;
pub mod snapshot;
pub mod statistics;

pub use filter::{filter_stations, StationFilter};
pub use snapshot::StationSnapshot;
pub use statistics::{StationStatistics, TOTAL_KEY};
