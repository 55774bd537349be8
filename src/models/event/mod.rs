// Event module
// Calendar event model as consumed by the layout engine

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata key used for the display colour of an event.
pub const COLOR_KEY: &str = "color";

/// A point in time as supplied by the event source.
///
/// Times are resolved against the display time zone only when a layout pass
/// runs, so an event can be laid out in any zone without being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTime {
    /// An absolute instant.
    Utc(DateTime<Utc>),
    /// Wall-clock time in a named IANA zone (e.g. `Europe/Berlin`).
    Zoned { local: NaiveDateTime, zone: String },
    /// Wall-clock time interpreted in whatever zone is being displayed.
    Floating(NaiveDateTime),
    /// A calendar date without a time of day.
    Date(NaiveDate),
}

impl From<DateTime<Utc>> for EventTime {
    fn from(value: DateTime<Utc>) -> Self {
        EventTime::Utc(value)
    }
}

impl From<NaiveDateTime> for EventTime {
    fn from(value: NaiveDateTime) -> Self {
        EventTime::Floating(value)
    }
}

impl From<NaiveDate> for EventTime {
    fn from(value: NaiveDate) -> Self {
        EventTime::Date(value)
    }
}

/// Validation failures for events entering the crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("event id cannot be empty")]
    EmptyId,
    #[error("event {0} is missing its {1}")]
    MissingField(String, &'static str),
    #[error("event {0} ends before it starts")]
    EndBeforeStart(String),
    #[error("colour must be in hex format (#RRGGBB or #RGB), got {0:?}")]
    InvalidColor(String),
}

/// Calendar event handed to the layout engine.
///
/// The engine only ever borrows events; positioned output refers back to
/// the original value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default)]
    pub all_day: bool,
    /// Free-form display data (colour, category, location, ...).
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl CalendarEvent {
    /// Create a timed event without validating it.
    ///
    /// # Examples
    /// ```
    /// use calendar_layout::models::event::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let event = CalendarEvent::new(
    ///     "standup",
    ///     "Standup",
    ///     day.and_hms_opt(9, 0, 0).unwrap(),
    ///     day.and_hms_opt(9, 15, 0).unwrap(),
    /// );
    /// assert!(!event.all_day);
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: impl Into<EventTime>,
        end: impl Into<EventTime>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start: start.into(),
            end: end.into(),
            all_day: false,
            metadata: BTreeMap::new(),
        }
    }

    /// Create an all-day event covering `start` up to, but not including, `end`.
    pub fn all_day(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            all_day: true,
            ..Self::new(id, title, start, end)
        }
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Boundary validation applied before events reach the layout engine.
    ///
    /// Ordering of start and end is only checked when both values use the
    /// same representation; mixed representations are checked once they are
    /// resolved into a time zone.
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }

        let reversed = match (&self.start, &self.end) {
            (EventTime::Utc(s), EventTime::Utc(e)) => e < s,
            (EventTime::Floating(s), EventTime::Floating(e)) => e < s,
            (EventTime::Date(s), EventTime::Date(e)) => e < s,
            (
                EventTime::Zoned { local: s, zone: sz },
                EventTime::Zoned { local: e, zone: ez },
            ) if sz == ez => e < s,
            _ => false,
        };
        if reversed {
            return Err(EventError::EndBeforeStart(self.id.clone()));
        }

        if let Some(color) = self.color() {
            if !is_hex_color(color) {
                return Err(EventError::InvalidColor(color.to_string()));
            }
        }

        Ok(())
    }

    /// Display colour, if the source supplied one
    pub fn color(&self) -> Option<&str> {
        self.metadata.get(COLOR_KEY).map(String::as_str)
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Builder for creating events with optional fields
#[derive(Debug, Default)]
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<EventTime>,
    end: Option<EventTime>,
    all_day: bool,
    metadata: BTreeMap<String, String>,
}

impl EventBuilder {
    /// Create a new event builder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: impl Into<EventTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn end(mut self, end: impl Into<EventTime>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set as all-day event
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color (hex format)
    pub fn color(self, color: impl Into<String>) -> Self {
        self.metadata(COLOR_KEY, color)
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Build and validate the event
    pub fn build(self) -> Result<CalendarEvent, EventError> {
        let id = self.id.ok_or(EventError::EmptyId)?;
        let start = self
            .start
            .ok_or_else(|| EventError::MissingField(id.clone(), "start"))?;
        let end = self
            .end
            .ok_or_else(|| EventError::MissingField(id.clone(), "end"))?;

        let event = CalendarEvent {
            id,
            title: self.title.unwrap_or_default(),
            start,
            end,
            all_day: self.all_day,
            metadata: self.metadata,
        };

        event.validate()?;
        Ok(event)
    }
}
