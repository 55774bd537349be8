// Date utility functions
// Calendar arithmetic shared by windows, layout and interaction

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// Every date from `start` up to and including `end`; empty when `end < start`
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Midnight following `date`, i.e. the exclusive end of that day
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1)
}

/// Minutes elapsed between the start of `day` and `at`
pub fn minutes_into_day(day: NaiveDate, at: NaiveDateTime) -> i64 {
    (at - start_of_day(day)).num_minutes()
}

/// Format a time of day according to the 12/24-hour preference
pub fn format_time(time: NaiveTime, use_24_hour: bool) -> String {
    if use_24_hour {
        time.format("%H:%M").to_string()
    } else if time.minute() == 0 {
        time.format("%-I %p").to_string()
    } else {
        time.format("%-I:%M %p").to_string()
    }
}

/// Labels for the 24 hour rows of a time grid
pub fn hour_labels(use_24_hour: bool) -> Vec<String> {
    (0..24)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .map(|time| format_time(time, use_24_hour))
        .collect()
}

/// Round `at` to the nearest slot boundary within its day.
///
/// The result never leaves the day `at` belongs to: rounding up past the
/// last slot yields the final slot start instead of the next midnight.
pub fn snap_to_slot(at: NaiveDateTime, slot_minutes: u32) -> NaiveDateTime {
    let slot = i64::from(slot_minutes.max(1));
    let day = at.date();
    let minutes = minutes_into_day(day, at);
    let seconds = at.time().second() as i64;

    let mut slot_index = (minutes * 60 + seconds + slot * 30) / (slot * 60);
    let last_slot = (MINUTES_PER_DAY - 1) / slot;
    if slot_index > last_slot {
        slot_index = last_slot;
    }

    start_of_day(day) + Duration::minutes(slot_index * slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-01-15 is a Wednesday
    #[test_case(0, date(2025, 1, 12) ; "sunday start")]
    #[test_case(1, date(2025, 1, 13) ; "monday start")]
    #[test_case(3, date(2025, 1, 15) ; "wednesday start is same day")]
    #[test_case(4, date(2025, 1, 9) ; "thursday start goes back six days")]
    fn test_week_start(first_day: u8, expected: NaiveDate) {
        assert_eq!(week_start(date(2025, 1, 15), first_day), expected);
    }

    #[test]
    fn test_days_in_range_crosses_month() {
        let days = days_in_range(date(2025, 1, 30), date(2025, 2, 2));
        assert_eq!(
            days,
            vec![date(2025, 1, 30), date(2025, 1, 31), date(2025, 2, 1), date(2025, 2, 2)]
        );
    }

    #[test]
    fn test_days_in_range_empty_when_reversed() {
        assert!(days_in_range(date(2025, 2, 2), date(2025, 2, 1)).is_empty());
    }

    #[test_case(9, 0, false, "9 AM")]
    #[test_case(13, 30, false, "1:30 PM")]
    #[test_case(0, 0, false, "12 AM")]
    #[test_case(13, 30, true, "13:30")]
    #[test_case(7, 5, true, "07:05")]
    fn test_format_time(hour: u32, minute: u32, use_24_hour: bool, expected: &str) {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        assert_eq!(format_time(time, use_24_hour), expected);
    }

    #[test]
    fn test_hour_labels() {
        let labels = hour_labels(true);
        assert_eq!(labels.len(), 24);
        assert_eq!(labels[0], "00:00");
        assert_eq!(labels[23], "23:00");
        assert_eq!(hour_labels(false)[12], "12 PM");
    }

    #[test_case(9, 7, 9, 0 ; "rounds down")]
    #[test_case(9, 8, 9, 15 ; "rounds up")]
    #[test_case(23, 55, 23, 45 ; "stays within the day")]
    fn test_snap_to_slot(hour: u32, minute: u32, want_hour: u32, want_minute: u32) {
        let at = date(2025, 1, 15).and_hms_opt(hour, minute, 0).unwrap();
        let snapped = snap_to_slot(at, 15);
        assert_eq!(
            snapped,
            date(2025, 1, 15).and_hms_opt(want_hour, want_minute, 0).unwrap()
        );
    }

    #[test]
    fn test_minutes_into_day() {
        let day = date(2025, 1, 15);
        assert_eq!(minutes_into_day(day, day.and_hms_opt(1, 30, 0).unwrap()), 90);
        assert_eq!(minutes_into_day(day, end_of_day(day)), MINUTES_PER_DAY);
    }
}
