use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A calendar event: either a candidate to recommend or a committed entry in
/// a [`crate::Schedule`].
///
/// Events are plain values. Their identity is the name, which is not required
/// to be unique. `end >= start` is a precondition the constructor does not check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(default)]
    description: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl Event {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start,
            end,
            location: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Replace the tag list. Order is irrelevant and duplicates are kept.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Strict half-open overlap: touching at a boundary is not an overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn builder_sets_location_and_tags() {
        let event = Event::new("Jazz Night", "Live jazz", at(19), at(22))
            .with_location("Blue Note SF")
            .with_tags(["music", "entertainment", "music"]);

        assert_eq!(event.name(), "Jazz Night");
        assert_eq!(event.location(), "Blue Note SF");
        assert_eq!(event.tags(), ["music", "entertainment", "music"]);
        assert_eq!(event.duration(), Duration::hours(3));
    }

    #[test]
    fn touching_events_do_not_overlap() {
        let a = Event::new("a", "", at(9), at(10));
        let b = Event::new("b", "", at(10), at(11));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn nested_event_overlaps() {
        let outer = Event::new("outer", "", at(9), at(17));
        let inner = Event::new("inner", "", at(12), at(13));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn deserializes_with_optional_fields_missing() {
        let json = r#"{
            "name": "Standup",
            "start": "2026-03-10T09:00:00Z",
            "end": "2026-03-10T09:15:00Z"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.description(), "");
        assert_eq!(event.location(), "");
        assert!(event.tags().is_empty());
        assert_eq!(event.duration(), Duration::minutes(15));
    }
}
