// Property-based tests for the layout engine
// Checks lane, overflow and grid invariants against random event sets

#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::collections::BTreeMap;

use calendar_layout::models::layout::TimedInterval;
use calendar_layout::services::layout::resolver::resolve;
use calendar_layout::{grid_position, layout_week, CalendarEvent, LayoutSettings};
use chrono::Duration;
use chrono_tz::Tz;
use fixtures::dates::{jan, jan_at, week};
use proptest::prelude::*;

/// Timed events somewhere between the 10th and 20th, up to ten hours long
fn timed_events() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec((10u32..20, 0i64..1440, 0i64..600), 0..25).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (day, start_min, duration_min))| {
                let start = jan_at(day, 0, 0) + Duration::minutes(start_min);
                CalendarEvent::new(
                    format!("t{i}"),
                    "Timed",
                    start,
                    start + Duration::minutes(duration_min),
                )
            })
            .collect()
    })
}

/// All-day events starting between the 8th and 21st, up to five days long
fn all_day_events() -> impl Strategy<Value = Vec<CalendarEvent>> {
    prop::collection::vec((8u32..22, 0u32..5), 0..25).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (start, len))| {
                CalendarEvent::all_day(format!("a{i}"), "All day", jan(start), jan(start + len))
            })
            .collect()
    })
}

fn timed_lanes(events: &[CalendarEvent]) -> BTreeMap<(String, chrono::NaiveDate), usize> {
    let layout = layout_week(events, &week(), &LayoutSettings::default());
    layout
        .timed_by_day
        .iter()
        .flat_map(|(day, placed)| placed.iter().map(move |p| ((p.event.id.clone(), *day), p.lane())))
        .collect()
}

/// Lane, column and span per banner event, plus the overflow count per day
type BannerSummary = (BTreeMap<String, (usize, usize, usize)>, Vec<(chrono::NaiveDate, usize)>);

fn banner_lanes(events: &[CalendarEvent], capacity: usize) -> BannerSummary {
    let settings = LayoutSettings { min_visible_lanes: capacity, ..LayoutSettings::default() };
    let layout = layout_week(events, &week(), &settings);
    let placed = layout
        .banner
        .iter()
        .filter_map(|p| p.banner().map(|g| (p.event.id.clone(), (g.lane, g.column, g.span))))
        .collect();
    let overflow = layout.overflow_by_day.iter().map(|(day, o)| (*day, o.count)).collect();
    (placed, overflow)
}

proptest! {
    /// Property: events sharing a lane never overlap
    #[test]
    fn prop_same_lane_never_overlaps(events in timed_events()) {
        let layout = layout_week(&events, &week(), &LayoutSettings::default());

        for placed in layout.timed_by_day.values() {
            for (i, a) in placed.iter().enumerate() {
                for b in &placed[i + 1..] {
                    if a.lane() == b.lane() {
                        prop_assert!(
                            !a.interval.overlaps(&b.interval),
                            "{} and {} overlap in lane {}", a.event.id, b.event.id, a.lane()
                        );
                    }
                }
            }
        }
    }

    /// Property: banner events sharing a lane never share a day
    #[test]
    fn prop_banner_lanes_disjoint(events in all_day_events()) {
        let layout = layout_week(&events, &week(), &LayoutSettings::default());

        for (i, a) in layout.banner.iter().enumerate() {
            for b in &layout.banner[i + 1..] {
                let (ga, gb) = (a.banner().unwrap(), b.banner().unwrap());
                if ga.lane == gb.lane {
                    let disjoint = ga.column + ga.span <= gb.column || gb.column + gb.span <= ga.column;
                    prop_assert!(disjoint, "{} and {} share lane {}", a.event.id, b.event.id, ga.lane);
                }
            }
        }
    }

    /// Property: lane assignment does not depend on input order
    #[test]
    fn prop_layout_independent_of_input_order(
        (events, shuffled) in timed_events().prop_flat_map(|events| {
            let shuffled = Just(events.clone()).prop_shuffle();
            (Just(events), shuffled)
        })
    ) {
        prop_assert_eq!(timed_lanes(&events), timed_lanes(&shuffled));
    }

    /// Property: banner lanes and overflow do not depend on input order
    #[test]
    fn prop_banner_independent_of_input_order(
        (events, shuffled) in all_day_events().prop_flat_map(|events| {
            let shuffled = Just(events.clone()).prop_shuffle();
            (Just(events), shuffled)
        }),
        capacity in 1usize..4,
    ) {
        prop_assert_eq!(banner_lanes(&events, capacity), banner_lanes(&shuffled, capacity));
    }

    /// Property: per day, visible plus overflow equals every banner event on that day
    #[test]
    fn prop_overflow_accounts_for_every_event(
        events in all_day_events(),
        capacity in 1usize..4,
    ) {
        let settings = LayoutSettings { min_visible_lanes: capacity, ..LayoutSettings::default() };
        let window = week();
        let layout = layout_week(&events, &window, &settings);

        prop_assert!(layout.banner_lane_count <= capacity);

        for (column, day) in window.days().iter().enumerate() {
            let visible = layout
                .banner
                .iter()
                .filter_map(|p| p.banner())
                .filter(|g| g.column <= column && column < g.column + g.span)
                .count();
            let overflow = layout.overflow_on(*day).map_or(0, |o| o.count);
            let total = events
                .iter()
                .filter(|e| {
                    let interval = resolve(e, Tz::UTC).unwrap();
                    interval.first_day() <= *day && *day <= interval.last_day()
                })
                .count();

            prop_assert!(visible <= capacity);
            prop_assert_eq!(visible + overflow, total, "day {}", day);
        }
    }

    /// Property: grid positions always stay inside the window
    #[test]
    fn prop_grid_position_in_bounds(events in all_day_events()) {
        let window = week();
        for event in &events {
            if let Some(position) = grid_position(event, &window, Tz::UTC).unwrap() {
                prop_assert!(position.span >= 1);
                prop_assert!(position.column + position.span <= window.len());
            }
        }
    }

    /// Property: nothing outside the window shows up, everything else is clipped to it
    #[test]
    fn prop_output_inside_window(events in timed_events()) {
        let window = week();
        let (lo, hi) = window.bounds().unwrap();
        let layout = layout_week(&events, &window, &LayoutSettings::default());

        for placed in layout.timed_by_day.values().flatten() {
            prop_assert!(placed.interval.start >= lo && placed.interval.end <= hi);
        }

        for event in &events {
            let interval: TimedInterval = resolve(event, Tz::UTC).unwrap();
            let touches = interval.clip(lo, hi).is_some();
            let placed = layout
                .timed_by_day
                .values()
                .flatten()
                .any(|p| p.event.id == event.id);
            prop_assert_eq!(touches, placed, "event {}", &event.id);
        }
    }
}
