// Test fixtures - reusable test data
// Provides consistent events and windows across all test files

#![allow(dead_code)]

use calendar_layout::{CalendarEvent, Window};
use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Wednesday, Jan 15 2025
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    /// Day in January 2025
    pub fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    pub fn jan_at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        jan(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    /// Sunday 12th to Saturday 18th of January 2025
    pub fn week() -> Window {
        Window::week(wednesday(), 0)
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::*;
    use super::*;

    pub fn timed(id: &str, day: u32, start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        CalendarEvent::new(
            id,
            format!("Event {id}"),
            jan_at(day, start.0, start.1),
            jan_at(day, end.0, end.1),
        )
    }

    /// All-day event from `start` up to, not including, `end` (days of January)
    pub fn all_day(id: &str, start: u32, end: u32) -> CalendarEvent {
        CalendarEvent::all_day(id, format!("Event {id}"), jan(start), jan(end))
    }

    /// A busy Wednesday: standup, an overlapping pair and a lunch
    pub fn busy_wednesday() -> Vec<CalendarEvent> {
        vec![
            timed("standup", 15, (9, 0), (9, 15)),
            timed("review", 15, (9, 0), (10, 0)),
            timed("design", 15, (9, 30), (10, 30)),
            timed("lunch", 15, (12, 0), (13, 0)),
        ]
    }
}
