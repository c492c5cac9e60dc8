pub mod config;
pub mod recommend;
pub mod slots;

use chrono::{DateTime, Local, Utc};
use masterbot_core::Event;
use std::path::Path;

/// Read a JSON array of events.
pub fn read_events(path: &Path) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let events = serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
    Ok(events)
}

/// Write `events` as a pretty JSON array.
pub fn write_events(path: &Path, events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Parse an RFC 3339 timestamp.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}

pub fn format_local(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%a %Y-%m-%d %H:%M").to_string()
}
