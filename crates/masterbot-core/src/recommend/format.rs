//! Plain-text renderings sent to the reasoning backend.
//!
//! Layout is informal; what matters is that every field the backend needs is
//! present.

use std::fmt::Write;

use crate::event::Event;
use crate::preferences::Preferences;

/// Render every event's name, description, location and tags.
pub fn format_event_data<'a, I>(events: I) -> String
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "Event: {}", event.name());
        let _ = writeln!(out, "Description: {}", event.description());
        let _ = writeln!(out, "Location: {}", event.location());
        let _ = writeln!(out, "Tags: {}", event.tags().join(" "));
        out.push('\n');
    }
    out
}

/// Render every interest with its weight, every time window, the home
/// location and the travel limit.
pub fn format_preferences(preferences: &Preferences) -> String {
    let mut out = String::from("User Interests:\n");
    for (tag, weight) in preferences.interests() {
        let _ = writeln!(out, "- {tag} (weight: {weight})");
    }

    out.push_str("\nPreferred Time Slots:\n");
    for window in preferences.time_windows() {
        let _ = writeln!(out, "- {}:00 to {}:00", window.start_hour, window.end_hour);
    }

    let _ = writeln!(out, "\nLocation: {}", preferences.home_location());
    let _ = writeln!(
        out,
        "Max Travel Distance: {} km",
        preferences.max_travel_distance()
    );
    out
}
