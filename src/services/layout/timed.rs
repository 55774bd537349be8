// Timed grid layout
// Lane assignment and geometry for events inside a single day column

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::packing::{assign_lanes, Span};
use crate::models::event::CalendarEvent;
use crate::models::layout::{Placement, PositionedEvent, TimedGeometry, TimedInterval};
use crate::models::settings::LayoutSettings;
use crate::utils::date::{end_of_day, start_of_day};

const SECONDS_PER_DAY: f32 = 86_400.0;

struct TimedSlot<'a> {
    event: &'a CalendarEvent,
    interval: TimedInterval,
    /// End used for packing, stretched to the minimum visual duration
    packed_end: NaiveDateTime,
}

impl Span for TimedSlot<'_> {
    type Point = NaiveDateTime;

    fn start(&self) -> NaiveDateTime {
        self.interval.start
    }

    fn end(&self) -> NaiveDateTime {
        self.packed_end
    }

    fn tiebreak(&self) -> &str {
        &self.event.id
    }
}

/// Horizontal placement of `lane`: `(left, width)` as column fractions.
///
/// Lane 0 spans the column; later lanes are indented by `lane_indent` per
/// lane (capped at `max_lane_indent`) and narrowed so they never leave the
/// column.
pub fn lane_geometry(lane: usize, settings: &LayoutSettings) -> (f32, f32) {
    if lane == 0 {
        return (0.0, 1.0);
    }

    let left = (lane as f32 * settings.lane_indent).min(settings.max_lane_indent);
    let width = settings.secondary_lane_width.min(1.0 - left);
    (left, width)
}

/// Lay out timed events on `day`.
///
/// `resolved` holds unclipped intervals; anything not touching the day is
/// skipped and the rest is clipped to the day's bounds. The output is in
/// placement order.
pub fn layout_timed_day<'a>(
    resolved: &[(&'a CalendarEvent, TimedInterval)],
    day: NaiveDate,
    settings: &LayoutSettings,
) -> Vec<PositionedEvent<'a>> {
    let day_start = start_of_day(day);
    let day_end = end_of_day(day);
    let min_duration = Duration::minutes(i64::from(settings.min_event_minutes));

    let slots: Vec<TimedSlot<'a>> = resolved
        .iter()
        .filter_map(|(event, interval)| {
            let interval = interval.clip(day_start, day_end)?;
            let packed_end = interval.end.max(interval.start + min_duration).min(day_end);
            Some(TimedSlot {
                event: *event,
                interval,
                packed_end,
            })
        })
        .collect();

    let lanes = assign_lanes(&slots);

    lanes
        .order
        .iter()
        .map(|&index| {
            let slot = &slots[index];
            let lane = lanes.lane_of[index];
            let (left, width) = lane_geometry(lane, settings);

            let top = (slot.interval.start - day_start).num_seconds() as f32 / SECONDS_PER_DAY;
            let visible = (slot.packed_end - slot.interval.start).num_seconds() as f32;
            let height = (visible / SECONDS_PER_DAY).min(1.0 - top);

            PositionedEvent {
                event: slot.event,
                interval: slot.interval,
                placement: Placement::Timed(TimedGeometry {
                    lane,
                    top,
                    height,
                    left,
                    width,
                    z_index: lane as u32,
                }),
            }
        })
        .collect()
}
