// Event interaction
//
// Pure counterparts of drag-to-move and edge resizing:
// - Move: shift an event to a new start, keeping its duration
// - Top/Bottom handles: adjust start/end time (timed grid)
// - Left/Right handles: adjust start/end date (banner row)
//
// A proposal is applied to a copy of the event list so the caller can
// re-run layout optimistically while the original events stay untouched.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::models::event::{CalendarEvent, EventTime};
use crate::models::layout::{ResolveError, TimedInterval};
use crate::models::window::Window;
use crate::services::layout::resolver::resolve_with_elapsed;
use crate::utils::date::{snap_to_slot, start_of_day, MINUTES_PER_DAY};

/// Shortest duration a resize may leave a timed event with
pub const MIN_RESIZE_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("no event with id {0}")]
    UnknownEvent(String),
    #[error("event {event_id} cannot be resolved: {source}")]
    Resolve {
        event_id: String,
        #[source]
        source: ResolveError,
    },
    #[error("event {event_id} would be shorter than {} minutes", MIN_RESIZE_MINUTES)]
    TooShort { event_id: String },
    #[error("{0} does not exist in the display time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// Which edge of the event is being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    /// Top edge - adjusts start time
    Top,
    /// Bottom edge - adjusts end time
    Bottom,
    /// Left edge - adjusts start date (multi-day events)
    Left,
    /// Right edge - adjusts end date (multi-day events)
    Right,
}

impl ResizeHandle {
    /// Returns true if this handle adjusts time (vertical drag)
    pub fn is_vertical(&self) -> bool {
        matches!(self, ResizeHandle::Top | ResizeHandle::Bottom)
    }

    /// Returns true if this handle adjusts date (horizontal drag)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ResizeHandle::Left | ResizeHandle::Right)
    }
}

/// Move an event so it starts at `new_start`, keeping its duration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveProposal {
    pub event_id: String,
    /// Wall-clock start in the display zone; only the date is used for all-day events
    pub new_start: NaiveDateTime,
}

impl MoveProposal {
    pub fn new(event_id: impl Into<String>, new_start: NaiveDateTime) -> Self {
        Self {
            event_id: event_id.into(),
            new_start,
        }
    }
}

/// Drag one edge of an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeProposal {
    pub event_id: String,
    pub handle: ResizeHandle,
    /// Time under the pointer, used by vertical handles
    pub hovered_time: Option<NaiveTime>,
    /// Day under the pointer, used by horizontal handles
    pub hovered_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Proposal {
    Move(MoveProposal),
    Resize(ResizeProposal),
}

impl Proposal {
    pub fn event_id(&self) -> &str {
        match self {
            Proposal::Move(proposal) => &proposal.event_id,
            Proposal::Resize(proposal) => &proposal.event_id,
        }
    }
}

impl ResizeProposal {
    /// New wall-clock interval, or `None` while the pointer gives nothing usable
    fn hovered_interval(&self, original: &TimedInterval, all_day: bool) -> Option<TimedInterval> {
        let (mut start, mut end) = (original.start, original.end);

        match self.handle {
            ResizeHandle::Top => start = original.start.date().and_time(self.hovered_time?),
            ResizeHandle::Bottom => {
                // an end at midnight belongs to the last day the event covers
                end = original.last_day().and_time(self.hovered_time?);
            }
            ResizeHandle::Left => start = self.hovered_date?.and_time(original.start.time()),
            ResizeHandle::Right => {
                let date = self.hovered_date?;
                end = if all_day {
                    start_of_day(date) + Duration::days(1)
                } else {
                    date.and_time(original.end.time())
                };
            }
        }

        Some(TimedInterval::new(start, end))
    }
}

fn to_instant(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, InteractionError> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|instant| instant.with_timezone(&Utc))
        .ok_or(InteractionError::NonexistentLocalTime(local))
}

/// Apply `proposal` to `event`, returning the edited copy.
pub fn apply(
    event: &CalendarEvent,
    proposal: &Proposal,
    tz: Tz,
) -> Result<CalendarEvent, InteractionError> {
    let (original, elapsed) =
        resolve_with_elapsed(event, tz).map_err(|source| InteractionError::Resolve {
            event_id: event.id.clone(),
            source,
        })?;

    let mut edited = event.clone();

    if let Proposal::Move(movement) = proposal {
        if !event.all_day {
            // real duration is kept, even when the move crosses a DST change
            let start = to_instant(movement.new_start, tz)?;
            edited.start = EventTime::Utc(start);
            edited.end = EventTime::Utc(start + elapsed);
            return Ok(edited);
        }
    }

    let proposed = match proposal {
        Proposal::Move(movement) => {
            let start = start_of_day(movement.new_start.date());
            TimedInterval::new(start, start + original.duration())
        }
        Proposal::Resize(resize) => resize
            .hovered_interval(&original, event.all_day)
            .unwrap_or(original),
    };

    if event.all_day {
        if proposed.end <= proposed.start {
            return Err(InteractionError::TooShort {
                event_id: event.id.clone(),
            });
        }
        edited.start = EventTime::Date(proposed.first_day());
        edited.end = EventTime::Date(proposed.last_day() + Duration::days(1));
    } else {
        if proposed.duration() < Duration::minutes(MIN_RESIZE_MINUTES) {
            return Err(InteractionError::TooShort {
                event_id: event.id.clone(),
            });
        }
        edited.start = EventTime::Utc(to_instant(proposed.start, tz)?);
        edited.end = EventTime::Utc(to_instant(proposed.end, tz)?);
    }

    Ok(edited)
}

/// Copy of `events` with `proposal` applied, ready to be laid out again.
pub fn preview(
    events: &[CalendarEvent],
    proposal: &Proposal,
    tz: Tz,
) -> Result<Vec<CalendarEvent>, InteractionError> {
    let target = events
        .iter()
        .position(|event| event.id == proposal.event_id())
        .ok_or_else(|| InteractionError::UnknownEvent(proposal.event_id().to_string()))?;

    let edited = apply(&events[target], proposal, tz).map_err(|err| {
        log::warn!("Rejected proposal for event {}: {}", proposal.event_id(), err);
        err
    })?;

    let mut preview = events.to_vec();
    preview[target] = edited;
    Ok(preview)
}

/// Time under a pointer at `fraction` of the way down a day column,
/// snapped to `slot_minutes`.
pub fn time_at_fraction(day: NaiveDate, fraction: f32, slot_minutes: u32) -> NaiveDateTime {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let seconds = (f64::from(fraction) * (MINUTES_PER_DAY * 60) as f64).round() as i64;
    let at = start_of_day(day) + Duration::seconds(seconds.min(MINUTES_PER_DAY * 60 - 1));
    snap_to_slot(at, slot_minutes)
}

/// Day under a pointer at `fraction` of the way across the window's columns
pub fn date_at_fraction(window: &Window, fraction: f32) -> Option<NaiveDate> {
    if window.is_empty() || !(0.0..=1.0).contains(&fraction) {
        return None;
    }
    let column = ((fraction * window.len() as f32) as usize).min(window.len() - 1);
    window.days().get(column).copied()
}
