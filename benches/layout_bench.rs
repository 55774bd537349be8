// Benchmark for the layout engine
// Measures timed lane packing and week layout as event counts grow

use calendar_layout::{layout_day, layout_week, CalendarEvent, LayoutSettings, Window};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

/// Staggered half-hour to two-hour meetings across the working day
fn busy_day(count: usize) -> Vec<CalendarEvent> {
    let day_start = anchor().and_hms_opt(8, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = day_start + Duration::minutes((i as i64 * 7) % 600);
            let end = start + Duration::minutes(30 + (i as i64 * 13) % 90);
            CalendarEvent::new(format!("e{i}"), "Meeting", start, end)
        })
        .collect()
}

/// A mix of timed and multi-day all-day events spread over a week
fn busy_week(count: usize) -> Vec<CalendarEvent> {
    let week_start = anchor() - Duration::days(3);
    (0..count)
        .map(|i| {
            let day = week_start + Duration::days(i as i64 % 7);
            if i % 4 == 0 {
                let end = day + Duration::days(1 + i as i64 % 3);
                CalendarEvent::all_day(format!("a{i}"), "Away", day, end)
            } else {
                let start = day.and_hms_opt(9, 0, 0).unwrap() + Duration::minutes((i as i64 * 11) % 480);
                CalendarEvent::new(format!("t{i}"), "Meeting", start, start + Duration::minutes(45))
            }
        })
        .collect()
}

fn bench_layout_day(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_day");
    let settings = LayoutSettings::default();

    for count in [10, 100, 1000].iter() {
        let events = busy_day(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| layout_day(black_box(events), black_box(anchor()), &settings));
        });
    }

    group.finish();
}

fn bench_layout_week(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_week");
    let settings = LayoutSettings::default();
    let window = Window::week(anchor(), 0);

    for count in [10, 100, 1000].iter() {
        let events = busy_week(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| layout_week(black_box(events), black_box(&window), &settings));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout_day, bench_layout_week);
criterion_main!(benches);
