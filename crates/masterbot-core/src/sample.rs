//! Demo candidate events, used when no event file is supplied.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;

/// Four events spread over the next two days, offset from `now`.
pub fn sample_events(now: DateTime<Utc>) -> Vec<Event> {
    let tomorrow = now + Duration::hours(24);
    let day_after = now + Duration::hours(48);

    vec![
        Event::new(
            "Tech Conference 2024",
            "Annual technology conference",
            tomorrow,
            tomorrow + Duration::hours(8),
        )
        .with_location("San Francisco Convention Center")
        .with_tags(["technology", "networking"]),
        Event::new(
            "Jazz Night",
            "Live jazz music performance",
            tomorrow + Duration::hours(19),
            tomorrow + Duration::hours(22),
        )
        .with_location("Blue Note SF")
        .with_tags(["music", "entertainment"]),
        Event::new(
            "Basketball Game",
            "Local team championship",
            day_after + Duration::hours(15),
            day_after + Duration::hours(18),
        )
        .with_location("Oracle Arena")
        .with_tags(["sports", "entertainment"]),
        Event::new(
            "Cooking Workshop",
            "Learn Italian cuisine",
            day_after + Duration::hours(11),
            day_after + Duration::hours(14),
        )
        .with_location("Culinary Institute")
        .with_tags(["cooking", "education"]),
    ]
}
