// Layout module
// Geometry produced by a layout pass. Everything here borrows the input
// events and is recomputed on every pass.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::models::event::CalendarEvent;
use crate::models::window::Window;
use crate::utils::date::format_time;

/// Why an event could not be resolved into the display time zone.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ResolveError {
    #[error("unknown time zone {0:?}")]
    UnknownTimeZone(String),
    #[error("{local} does not exist in {zone}")]
    NonexistentLocalTime { local: NaiveDateTime, zone: String },
    #[error("end {end} is before start {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// An event that was left out of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutDiagnostic {
    pub event_id: String,
    pub error: ResolveError,
}

/// Wall-clock interval of an event in the display zone, possibly clipped
/// to the bounds being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// The event really starts before `start`
    pub clipped_start: bool,
    /// The event really ends after `end`
    pub clipped_end: bool,
}

impl TimedInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            clipped_start: false,
            clipped_end: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open intersection test
    pub fn overlaps(&self, other: &TimedInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Clamp to `[lo, hi)`. Returns `None` when nothing of the interval
    /// falls inside; a zero-length interval counts as inside when
    /// `lo <= start < hi`.
    pub fn clip(&self, lo: NaiveDateTime, hi: NaiveDateTime) -> Option<TimedInterval> {
        let inside = if self.start == self.end {
            lo <= self.start && self.start < hi
        } else {
            self.start < hi && lo < self.end
        };
        if !inside {
            return None;
        }

        Some(TimedInterval {
            start: self.start.max(lo),
            end: self.end.min(hi),
            clipped_start: self.clipped_start || self.start < lo,
            clipped_end: self.clipped_end || self.end > hi,
        })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    /// Last calendar day the interval touches; an end exactly at midnight
    /// does not count as touching that day.
    pub fn last_day(&self) -> NaiveDate {
        if self.end > self.start {
            (self.end - Duration::nanoseconds(1)).date()
        } else {
            self.start.date()
        }
    }
}

/// Geometry of an event in the timed grid, in fractions of the day column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedGeometry {
    pub lane: usize,
    /// Distance from the top of the day, 0.0 = midnight
    pub top: f32,
    pub height: f32,
    pub left: f32,
    pub width: f32,
    pub z_index: u32,
}

/// Geometry of an event in the all-day banner row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BannerGeometry {
    pub lane: usize,
    pub column: usize,
    pub span: usize,
    /// The event starts before the first rendered day
    pub continues_before: bool,
    /// The event ends after the last rendered day
    pub continues_after: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Timed(TimedGeometry),
    Banner(BannerGeometry),
}

/// An event together with where it goes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub interval: TimedInterval,
    pub placement: Placement,
}

impl PositionedEvent<'_> {
    pub fn lane(&self) -> usize {
        match &self.placement {
            Placement::Timed(geometry) => geometry.lane,
            Placement::Banner(geometry) => geometry.lane,
        }
    }

    pub fn timed(&self) -> Option<&TimedGeometry> {
        match &self.placement {
            Placement::Timed(geometry) => Some(geometry),
            Placement::Banner(_) => None,
        }
    }

    pub fn banner(&self) -> Option<&BannerGeometry> {
        match &self.placement {
            Placement::Banner(geometry) => Some(geometry),
            Placement::Timed(_) => None,
        }
    }

    /// Visible time range such as "9 AM - 10:30 AM", or "All day" in the banner row
    pub fn time_label(&self, use_24_hour: bool) -> String {
        match self.placement {
            Placement::Banner(_) => "All day".to_string(),
            Placement::Timed(_) => format!(
                "{} - {}",
                format_time(self.interval.start.time(), use_24_hour),
                format_time(self.interval.end.time(), use_24_hour)
            ),
        }
    }
}

/// Banner events hidden on one day because the visible lanes are full.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DayOverflow<'a> {
    pub count: usize,
    pub events: Vec<&'a CalendarEvent>,
    /// How many of `events` start (within the window) on this day
    pub starting_here: usize,
}

pub type OverflowSet<'a> = BTreeMap<NaiveDate, DayOverflow<'a>>;

/// Column and span of a multi-day event in the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridPosition {
    pub column: usize,
    pub span: usize,
}

/// Result of laying out a single day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DayLayout<'a> {
    pub timed: Vec<PositionedEvent<'a>>,
    pub banner: Vec<PositionedEvent<'a>>,
    pub overflow: Option<DayOverflow<'a>>,
    pub diagnostics: Vec<LayoutDiagnostic>,
}

impl DayLayout<'_> {
    pub fn is_empty(&self) -> bool {
        self.timed.is_empty() && self.banner.is_empty() && self.overflow.is_none()
    }
}

/// Result of laying out a multi-day window.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WeekLayout<'a> {
    pub window: Window,
    pub timed_by_day: BTreeMap<NaiveDate, Vec<PositionedEvent<'a>>>,
    pub banner: Vec<PositionedEvent<'a>>,
    /// Visible banner lanes in use, never above the configured capacity
    pub banner_lane_count: usize,
    pub overflow_by_day: OverflowSet<'a>,
    pub diagnostics: Vec<LayoutDiagnostic>,
}

impl<'a> WeekLayout<'a> {
    pub fn timed_on(&self, day: NaiveDate) -> &[PositionedEvent<'a>] {
        self.timed_by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn overflow_on(&self, day: NaiveDate) -> Option<&DayOverflow<'a>> {
        self.overflow_by_day.get(&day)
    }
}
