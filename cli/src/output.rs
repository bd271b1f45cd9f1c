//! Console rendering: aligned text tables or JSON.

use serde_json::json;

use station_registry::{Session, Station, StationStatistics, StationStatus};

use crate::batch::DeletionSummary;

pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit(&self, value: serde_json::Value) {
        match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to encode output: {}", e),
        }
    }

    pub fn session(&self, session: &Session) {
        if self.json {
            self.emit(json!(session));
            return;
        }
        println!("Session {} ({})", session.id(), session.mode());
        if let Some(username) = session.username() {
            println!("   Signed in as {}", username);
        }
    }

    /// `total` is the size of the unfiltered listing.
    pub fn stations(&self, stations: &[Station], total: usize) {
        if self.json {
            self.emit(json!(stations));
            return;
        }
        if stations.is_empty() {
            println!("No stations found.");
            return;
        }
        println!(
            "{:>6}  {:<28}  {:<24}  {:<15}  {}",
            "ID", "NAME", "LOCATION", "STATUS", "LAST UPDATED"
        );
        for station in stations {
            println!("{}", row(station));
        }
        if stations.len() == total {
            println!("\n{} station(s)", total);
        } else {
            println!("\n{} of {} station(s)", stations.len(), total);
        }
    }

    pub fn station(&self, station: &Station) {
        if self.json {
            self.emit(json!(station));
            return;
        }
        println!("Station #{}", station.id);
        println!("   Name         : {}", station.name);
        println!(
            "   Location     : {}",
            station.location.as_deref().unwrap_or("-")
        );
        println!("   Status       : {}", station.status);
        println!("   Last updated : {}", last_updated(station));
    }

    pub fn statistics(&self, stats: &StationStatistics) {
        if self.json {
            self.emit(json!(stats.to_map()));
            return;
        }
        for status in StationStatus::ALL {
            println!("{:<16}{:>6}", status.display_label(), stats.count(status));
        }
        println!("{:<16}{:>6}", "Total", stats.total);
    }

    pub fn statuses(&self) {
        if self.json {
            let entries: Vec<_> = StationStatus::ALL
                .iter()
                .map(|s| json!({ "token": s.storage_token(), "label": s.display_label() }))
                .collect();
            self.emit(json!(entries));
            return;
        }
        for status in StationStatus::ALL {
            println!("{:<16}{}", status.storage_token(), status.display_label());
        }
    }

    /// Report the boolean result of update or update_status.
    pub fn outcome(&self, operation: &str, id: i64, changed: bool) {
        if self.json {
            self.emit(json!({ "operation": operation, "id": id, "changed": changed }));
            return;
        }
        if changed {
            println!("{}: station #{} done", operation, id);
        } else {
            println!("{}: station #{} not found, nothing changed", operation, id);
        }
    }

    pub fn deletions(&self, summary: &DeletionSummary) {
        if self.json {
            let failed: Vec<_> = summary
                .failed
                .iter()
                .map(|(id, e)| json!({ "id": id, "error": e.to_string() }))
                .collect();
            self.emit(json!({
                "deleted": summary.deleted,
                "missing": summary.missing,
                "failed": failed,
            }));
            return;
        }
        for id in &summary.missing {
            println!("delete: station #{} not found", id);
        }
        for (id, e) in &summary.failed {
            println!("delete: station #{} failed: {}", id, e);
        }
        if summary.is_complete() {
            println!("{} station(s) deleted", summary.deleted.len());
        } else {
            println!(
                "{} deleted, {} failed",
                summary.deleted.len(),
                summary.missing.len() + summary.failed.len()
            );
        }
    }
}

fn row(station: &Station) -> String {
    format!(
        "{:>6}  {:<28}  {:<24}  {:<15}  {}",
        station.id,
        truncate(&station.name, 28),
        truncate(station.location.as_deref().unwrap_or("-"), 24),
        station.status.display_label(),
        last_updated(station)
    )
}

fn last_updated(station: &Station) -> String {
    station
        .last_updated
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
