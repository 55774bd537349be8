// Grid position mapping
// Column and span of an event against the day columns of a window

use chrono_tz::Tz;

use super::resolver::resolve;
use crate::models::event::CalendarEvent;
use crate::models::layout::{GridPosition, ResolveError, TimedInterval};
use crate::models::window::Window;

/// Map an already resolved interval onto `window`.
///
/// The interval is clipped to the window first, so the result always
/// satisfies `column + span <= window.len()`. `None` when the interval
/// lies outside the window or the window is empty.
pub fn grid_span(interval: &TimedInterval, window: &Window) -> Option<GridPosition> {
    let (lo, hi) = window.bounds()?;
    let clipped = interval.clip(lo, hi)?;

    let column = window.index_of(clipped.first_day())?;
    let last = window.index_of(clipped.last_day())?;
    let span = (last + 1).saturating_sub(column).max(1);

    Some(GridPosition { column, span })
}

/// Column and span of `event` in `window` for the display zone `tz`.
pub fn grid_position(
    event: &CalendarEvent,
    window: &Window,
    tz: Tz,
) -> Result<Option<GridPosition>, ResolveError> {
    let interval = resolve(event, tz)?;
    Ok(grid_span(&interval, window))
}
