//! Seed data for the demo catalog.
//!
//! Pure functions with no side effects, usable from unit tests, integration
//! tests, and the demo binary alike.

use chrono::NaiveDate;

use super::types::Event;

/// Returns the seven-event catalog the demo serves as its authoritative
/// source.
///
/// Identifiers are stable (`"1"` through `"7"`) so lookups in tests and in
/// the scripted demo always resolve to the same records.
///
/// # Example
///
/// ```
/// use boxoffice_core::event::seed_events;
///
/// let events = seed_events();
/// assert_eq!(events.len(), 7);
/// ```
pub fn seed_events() -> Vec<Event> {
    let date = |y: i32, m: u32, d: u32| {
        NaiveDate::from_ymd_opt(y, m, d).expect("seed dates are valid by construction")
    };

    vec![
        Event::new("1", "Rock Show", "XYZ Stadium", date(2025, 11, 10), 1500),
        Event::new("2", "AI Lecture", "Convention Center", date(2025, 11, 15), 300),
        Event::new("3", "Food Festival", "Central Park", date(2025, 12, 1), 2000),
        Event::new(
            "4",
            "Sustainability Conference",
            "Green Auditorium",
            date(2025, 11, 22),
            500,
        ),
        Event::new("5", "Tech Fair 2025", "Expo Center", date(2025, 12, 10), 3000),
        Event::new(
            "6",
            "Galaxy Quest Game Launch",
            "Game Arena",
            date(2025, 11, 30),
            800,
        ),
        Event::new(
            "7",
            "Advanced Rust Workshop",
            "Tech Hub",
            date(2025, 11, 18),
            100,
        ),
    ]
}
