//! Event layout engine.
//!
//! Pure functions turning events plus a window of days into geometry:
//! - [`layout_day`] and [`layout_week`] split events into the timed grid and
//!   the all-day banner row and place both,
//! - [`grid_position`] maps a single event onto a window's day columns.
//!
//! Nothing is cached between calls; identical inputs give identical output.
//! Events that cannot be resolved in the display zone are left out and
//! reported as [`LayoutDiagnostic`]s instead of failing the pass.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;

use crate::models::event::CalendarEvent;
use crate::models::layout::{DayLayout, LayoutDiagnostic, TimedInterval, WeekLayout};
use crate::models::settings::LayoutSettings;
use crate::models::window::Window;

pub mod banner;
pub mod grid;
pub mod packing;
pub mod resolver;
pub mod timed;

pub use grid::grid_position;

/// Timed events lasting at least this long go to the banner row
const BANNER_MIN_HOURS: i64 = 24;

type Resolved<'a> = Vec<(&'a CalendarEvent, TimedInterval)>;

struct Partitioned<'a> {
    timed: Resolved<'a>,
    banner: Resolved<'a>,
    diagnostics: Vec<LayoutDiagnostic>,
}

/// Whether an event belongs in the all-day banner row rather than the timed grid.
/// `elapsed` is real time, not the wall-clock span, so DST days do not move
/// events across the threshold.
pub fn is_banner_event(event: &CalendarEvent, elapsed: Duration) -> bool {
    event.all_day || elapsed >= Duration::hours(BANNER_MIN_HOURS)
}

fn partition(events: &[CalendarEvent], tz: Tz) -> Partitioned<'_> {
    let mut partitioned = Partitioned {
        timed: Vec::new(),
        banner: Vec::new(),
        diagnostics: Vec::new(),
    };

    for event in events {
        match resolver::resolve_with_elapsed(event, tz) {
            Ok((interval, elapsed)) if is_banner_event(event, elapsed) => {
                partitioned.banner.push((event, interval));
            }
            Ok((interval, _)) => partitioned.timed.push((event, interval)),
            Err(error) => {
                log::warn!("Excluding event {} from layout: {}", event.id, error);
                partitioned.diagnostics.push(LayoutDiagnostic {
                    event_id: event.id.clone(),
                    error,
                });
            }
        }
    }

    partitioned
}

/// Lay out `events` over every day of `window`.
pub fn layout_week<'a>(
    events: &'a [CalendarEvent],
    window: &Window,
    settings: &LayoutSettings,
) -> WeekLayout<'a> {
    let partitioned = partition(events, settings.time_zone);

    let timed_by_day: BTreeMap<NaiveDate, _> = window
        .days()
        .iter()
        .map(|&day| (day, timed::layout_timed_day(&partitioned.timed, day, settings)))
        .collect();

    let banner = banner::layout_banner(&partitioned.banner, window, settings.min_visible_lanes);

    log::debug!(
        "Laid out {} events over {} days: {} timed placements, {} banner lanes, {} overflow days, {} excluded",
        events.len(),
        window.len(),
        timed_by_day.values().map(Vec::len).sum::<usize>(),
        banner.lane_count,
        banner.overflow.len(),
        partitioned.diagnostics.len()
    );

    WeekLayout {
        window: window.clone(),
        timed_by_day,
        banner: banner.placed,
        banner_lane_count: banner.lane_count,
        overflow_by_day: banner.overflow,
        diagnostics: partitioned.diagnostics,
    }
}

/// Lay out `events` for a single day.
pub fn layout_day<'a>(
    events: &'a [CalendarEvent],
    day: NaiveDate,
    settings: &LayoutSettings,
) -> DayLayout<'a> {
    let mut week = layout_week(events, &Window::day(day), settings);

    DayLayout {
        timed: week.timed_by_day.remove(&day).unwrap_or_default(),
        banner: week.banner,
        overflow: week.overflow_by_day.remove(&day),
        diagnostics: week.diagnostics,
    }
}
