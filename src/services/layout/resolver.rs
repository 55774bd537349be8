// Interval resolution
// Turns event times into wall-clock intervals in the display zone

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::models::event::{CalendarEvent, EventTime};
use crate::models::layout::{ResolveError, TimedInterval};
use crate::utils::date::{end_of_day, start_of_day};

/// Resolve a single event time to wall-clock time in `tz`.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant;
/// local times skipped by a DST jump are an error.
pub fn resolve_time(time: &EventTime, tz: Tz) -> Result<NaiveDateTime, ResolveError> {
    Ok(pin(time, tz)?.0)
}

/// Absolute instant of a wall-clock time in `tz`. Floating and date values
/// have no zone of their own; one falling in a DST gap is read with the
/// offset in force at that UTC time.
fn wall_clock_instant(local: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(instant, _) => instant,
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&local).fix();
            tz.from_utc_datetime(&(local - Duration::seconds(i64::from(offset.local_minus_utc()))))
        }
    }
}

/// Wall-clock time in `tz` together with the instant it stands for
fn pin(time: &EventTime, tz: Tz) -> Result<(NaiveDateTime, DateTime<Tz>), ResolveError> {
    match time {
        EventTime::Utc(at) => {
            let instant = at.with_timezone(&tz);
            Ok((instant.naive_local(), instant))
        }
        EventTime::Zoned { local, zone } => {
            let source: Tz = zone
                .parse()
                .map_err(|_| ResolveError::UnknownTimeZone(zone.clone()))?;
            let instant = source
                .from_local_datetime(local)
                .earliest()
                .ok_or_else(|| ResolveError::NonexistentLocalTime {
                    local: *local,
                    zone: zone.clone(),
                })?
                .with_timezone(&tz);
            Ok((instant.naive_local(), instant))
        }
        EventTime::Floating(local) => Ok((*local, wall_clock_instant(*local, tz))),
        EventTime::Date(date) => {
            let local = start_of_day(*date);
            Ok((local, wall_clock_instant(local, tz)))
        }
    }
}

/// Resolve an event to its full, unclipped interval in `tz`.
///
/// All-day events cover whole days: from the start date's midnight up to
/// the midnight after the last included day. Their end is exclusive, so
/// the last included day is one before the end date, but never before the
/// start date.
pub fn resolve(event: &CalendarEvent, tz: Tz) -> Result<TimedInterval, ResolveError> {
    resolve_with_elapsed(event, tz).map(|(interval, _)| interval)
}

/// Like [`resolve`], also returning the real time between start and end.
///
/// Order is checked on absolute instants. When a repeated fall-back hour
/// puts the wall-clock end at or before the wall-clock start, the end is
/// moved to `start + elapsed` so the event keeps its real length in the grid.
pub fn resolve_with_elapsed(
    event: &CalendarEvent,
    tz: Tz,
) -> Result<(TimedInterval, Duration), ResolveError> {
    let (start, start_at) = pin(&event.start, tz)?;
    let (end, end_at) = pin(&event.end, tz)?;

    if end_at < start_at {
        return Err(ResolveError::EndBeforeStart { start, end });
    }
    let elapsed = end_at - start_at;

    if !event.all_day {
        let end = if end <= start { start + elapsed } else { end };
        return Ok((TimedInterval::new(start, end), elapsed));
    }

    let first_day = start.date();
    let exclusive_end = if end.time() == NaiveTime::MIN {
        end.date()
    } else {
        end.date() + Duration::days(1)
    };
    let last_day = (exclusive_end - Duration::days(1)).max(first_day);

    Ok((
        TimedInterval::new(start_of_day(first_day), end_of_day(last_day)),
        elapsed,
    ))
}

/// Resolve an event and clip it to `[lo, hi)`; `Ok(None)` when it falls
/// entirely outside.
pub fn resolve_within(
    event: &CalendarEvent,
    lo: NaiveDateTime,
    hi: NaiveDateTime,
    tz: Tz,
) -> Result<Option<TimedInterval>, ResolveError> {
    Ok(resolve(event, tz)?.clip(lo, hi))
}
