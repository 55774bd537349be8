// Calendar Layout
// Lays out events read from a JSON file and prints the geometry as JSON

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};

use calendar_layout::models::layout::DayOverflow;
use calendar_layout::models::ui::ViewType;
use calendar_layout::{
    layout_day, layout_week, CalendarEvent, LayoutSettings, PositionedEvent, Window,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ViewArg {
    Day,
    WorkWeek,
    Week,
}

impl From<ViewArg> for ViewType {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Day => ViewType::Day,
            ViewArg::WorkWeek => ViewType::WorkWeek,
            ViewArg::Week => ViewType::Week,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding an array of events
    events: PathBuf,

    /// Settings file (TOML); the platform config directory is used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Day the view is anchored on (YYYY-MM-DD); today in the display zone when omitted
    #[arg(long)]
    date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "week")]
    view: ViewArg,

    /// JSON geometry, or a plain agenda using the configured 12/24-hour format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print compact instead of pretty JSON
    #[arg(long, action, default_value = "false")]
    compact: bool,
}

fn load_events(path: &Path) -> Result<Vec<CalendarEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    let events: Vec<CalendarEvent> =
        serde_json::from_str(&content).context("Failed to parse events")?;

    // Events failing boundary validation never reach the layout engine
    Ok(events
        .into_iter()
        .filter(|event| match event.validate() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Skipping invalid event: {}", err);
                false
            }
        })
        .collect())
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    json.context("Failed to serialize layout")
}

/// Agenda lines for one day: banner row, timed events, then hidden banner events
fn day_lines<'b, 'e: 'b>(
    day: NaiveDate,
    banner: impl Iterator<Item = &'b PositionedEvent<'e>>,
    timed: &'b [PositionedEvent<'e>],
    overflow: Option<&DayOverflow<'_>>,
    use_24_hour: bool,
) -> Vec<String> {
    let mut lines = vec![day.format("%a %Y-%m-%d").to_string()];
    for placed in banner.chain(timed) {
        lines.push(format!(
            "  {:<20} {} (lane {})",
            placed.time_label(use_24_hour),
            placed.event.title,
            placed.lane()
        ));
    }
    if let Some(overflow) = overflow {
        lines.push(format!("  +{} more", overflow.count));
    }
    lines
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => LayoutSettings::load(path),
        None => LayoutSettings::load_default(),
    }
    .context("Failed to load settings")?;

    let events = load_events(&cli.events)?;
    let anchor = cli
        .date
        .unwrap_or_else(|| Utc::now().with_timezone(&settings.time_zone).date_naive());
    let view = ViewType::from(cli.view);

    log::info!(
        "Laying out {} events for {} view around {} in {}",
        events.len(),
        view.label(),
        anchor,
        settings.time_zone.name()
    );

    let use_24_hour = settings.use_24_hour();
    let output = match (view, cli.format) {
        (ViewType::Day, OutputFormat::Json) => {
            to_json(&layout_day(&events, anchor, &settings), cli.compact)?
        }
        (ViewType::Day, OutputFormat::Text) => {
            let layout = layout_day(&events, anchor, &settings);
            day_lines(
                anchor,
                layout.banner.iter(),
                &layout.timed,
                layout.overflow.as_ref(),
                use_24_hour,
            )
            .join("\n")
        }
        (ViewType::WorkWeek | ViewType::Week, format) => {
            let window = Window::for_view(view, anchor, &settings);
            let layout = layout_week(&events, &window, &settings);
            match format {
                OutputFormat::Json => to_json(&layout, cli.compact)?,
                OutputFormat::Text => window
                    .days()
                    .iter()
                    .enumerate()
                    .flat_map(|(column, &day)| {
                        let banner = layout.banner.iter().filter(move |placed| {
                            placed
                                .banner()
                                .is_some_and(|g| g.column <= column && column < g.column + g.span)
                        });
                        day_lines(
                            day,
                            banner,
                            layout.timed_on(day),
                            layout.overflow_on(day),
                            use_24_hour,
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            }
        }
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_day_lines_use_hour_format() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let events = vec![
            CalendarEvent::new(
                "review",
                "Review",
                day.and_hms_opt(13, 0, 0).unwrap(),
                day.and_hms_opt(14, 30, 0).unwrap(),
            ),
            CalendarEvent::all_day("holiday", "Holiday", day, day + chrono::Duration::days(1)),
        ];
        let settings = LayoutSettings {
            time_format: "24h".to_string(),
            ..LayoutSettings::default()
        };
        let layout = layout_day(&events, day, &settings);

        let lines = day_lines(
            day,
            layout.banner.iter(),
            &layout.timed,
            layout.overflow.as_ref(),
            settings.use_24_hour(),
        );

        assert_eq!(
            lines,
            vec![
                "Wed 2025-01-15".to_string(),
                format!("  {:<20} Holiday (lane 0)", "All day"),
                format!("  {:<20} Review (lane 0)", "13:00 - 14:30"),
            ]
        );
    }
}
