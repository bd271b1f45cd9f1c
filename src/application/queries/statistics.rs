//! Per-status station counts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Station, StationStatus};

/// Key under which [`StationStatistics::to_map`] reports the overall count.
pub const TOTAL_KEY: &str = "TOTAL";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StationStatistics {
    pub available: u64,
    pub charging: u64,
    pub out_of_service: u64,
    pub total: u64,
}

impl StationStatistics {
    pub fn from_stations(stations: &[Station]) -> Self {
        let mut stats = Self::default();
        for station in stations {
            match station.status {
                StationStatus::Available => stats.available += 1,
                StationStatus::Charging => stats.charging += 1,
                StationStatus::OutOfService => stats.out_of_service += 1,
            }
        }
        stats.total = stations.len() as u64;
        stats
    }

    pub fn count(&self, status: StationStatus) -> u64 {
        match status {
            StationStatus::Available => self.available,
            StationStatus::Charging => self.charging,
            StationStatus::OutOfService => self.out_of_service,
        }
    }

    /// Storage token of every status (zero counts included) plus `TOTAL`.
    pub fn to_map(&self) -> BTreeMap<String, u64> {
        let mut map: BTreeMap<String, u64> = StationStatus::ALL
            .iter()
            .map(|s| (s.storage_token().to_string(), self.count(*s)))
            .collect();
        map.insert(TOTAL_KEY.to_string(), self.total);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_status_and_total() {
        let stations = vec![
            Station::new("A", None, StationStatus::Available),
            Station::new("B", None, StationStatus::Charging),
            Station::new("C", None, StationStatus::OutOfService),
            Station::new("D", None, StationStatus::Available),
        ];
        let stats = StationStatistics::from_stations(&stations);

        assert_eq!(stats.count(StationStatus::Available), 2);
        assert_eq!(stats.count(StationStatus::Charging), 1);
        assert_eq!(stats.count(StationStatus::OutOfService), 1);
        assert_eq!(stats.total, 4);

        let map = stats.to_map();
        assert_eq!(map["AVAILABLE"], 2);
        assert_eq!(map["CHARGING"], 1);
        assert_eq!(map["OUT_OF_SERVICE"], 1);
        assert_eq!(map[TOTAL_KEY], 4);
    }

    #[test]
    fn empty_snapshot_reports_zero_for_every_status() {
        let map = StationStatistics::from_stations(&[]).to_map();
        assert_eq!(map.len(), 4);
        assert!(map.values().all(|&n| n == 0));
    }
}
