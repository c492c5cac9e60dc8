//! Free-slot detection between committed events.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// A gap in the calendar, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FreeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Check if this slot can fit an event of the given length
    pub fn can_fit(&self, length: Duration) -> bool {
        self.duration() >= length
    }
}

/// Single left-to-right sweep over `events`, which must already be sorted by
/// start time.
pub(super) fn sweep(events: &[Event], start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<FreeSlot> {
    let mut slots = Vec::new();
    let mut cursor = start;

    for event in events {
        // Sorted input: nothing after this can touch the range
        if event.start() >= end {
            break;
        }
        if event.end() <= start {
            continue;
        }

        if cursor < event.start() {
            slots.push(FreeSlot::new(cursor, event.start()));
        }
        cursor = cursor.max(event.end());
    }

    if cursor < end {
        slots.push(FreeSlot::new(cursor, end));
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn empty_calendar_is_one_slot() {
        let slots = sweep(&[], at(9), at(17));
        assert_eq!(slots, [FreeSlot::new(at(9), at(17))]);
    }

    #[test]
    fn inverted_range_yields_nothing() {
        assert!(sweep(&[], at(17), at(9)).is_empty());
    }

    #[test]
    fn event_straddling_range_start_advances_cursor() {
        let events = [Event::new("early", "", at(7), at(10))];
        let slots = sweep(&events, at(9), at(12));
        assert_eq!(slots, [FreeSlot::new(at(10), at(12))]);
    }

    #[test]
    fn event_running_past_range_end_closes_sweep() {
        let events = [Event::new("late", "", at(11), at(15))];
        let slots = sweep(&events, at(9), at(12));
        assert_eq!(slots, [FreeSlot::new(at(9), at(11))]);
    }

    #[test]
    fn can_fit_compares_duration() {
        let slot = FreeSlot::new(at(9), at(10));
        assert!(slot.can_fit(Duration::minutes(60)));
        assert!(!slot.can_fit(Duration::minutes(61)));
    }
}
