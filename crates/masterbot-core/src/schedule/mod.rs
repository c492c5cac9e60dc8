//! The user's committed calendar.
//!
//! [`Schedule`] keeps its events sorted ascending by start time after every
//! mutation and answers the interval queries the recommendation engine needs:
//! overlap-based conflict detection, fully-contained range lookup and
//! free-slot discovery.

mod free_slots;

pub use free_slots::FreeSlot;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// An ordered collection of committed events.
///
/// Names are not unique. Adding two events with the same name creates two
/// independent entries. Conflict policy belongs to the caller; `add_event`
/// never rejects an overlapping event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Event>", into = "Vec<Event>")]
pub struct Schedule {
    events: Vec<Event>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event`, keeping the collection sorted by start time. Events
    /// with equal start times keep insertion order.
    pub fn add_event(&mut self, event: Event) {
        let idx = self
            .events
            .partition_point(|existing| existing.start() <= event.start());
        self.events.insert(idx, event);
    }

    /// Remove every event named `name`. Returns how many were removed.
    pub fn remove_event(&mut self, name: &str) -> usize {
        let before = self.events.len();
        self.events.retain(|event| event.name() != name);
        before - self.events.len()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lying entirely inside `[start, end]`.
    ///
    /// This is a containment filter, narrower than [`Schedule::has_conflict`]:
    /// an event that straddles either bound is not returned.
    pub fn events_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Event> {
        self.events
            .iter()
            .filter(|event| event.start() >= start && event.end() <= end)
            .cloned()
            .collect()
    }

    /// True if `event` overlaps any stored event (strict half-open overlap).
    pub fn has_conflict(&self, event: &Event) -> bool {
        self.events.iter().any(|existing| event.overlaps(existing))
    }

    /// Gaps inside `[start, end)` not covered by any stored event, in time order.
    pub fn free_time_slots(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<FreeSlot> {
        free_slots::sweep(&self.events, start, end)
    }
}

impl From<Vec<Event>> for Schedule {
    fn from(mut events: Vec<Event>) -> Self {
        events.sort_by_key(Event::start);
        Self { events }
    }
}

impl From<Schedule> for Vec<Event> {
    fn from(schedule: Schedule) -> Self {
        schedule.events
    }
}

impl FromIterator<Event> for Schedule {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
