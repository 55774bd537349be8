// Window module
// The contiguous run of days a view renders

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;

use crate::models::settings::LayoutSettings;
use crate::models::ui::ViewType;
use crate::utils::date::{days_in_range, end_of_day, start_of_day, week_start};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("window days are not contiguous: {before} is followed by {after}")]
    Gap { before: NaiveDate, after: NaiveDate },
}

/// Contiguous, ascending, duplicate-free calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Window {
    days: Vec<NaiveDate>,
}

impl Window {
    /// Single day window for the day view
    pub fn day(date: NaiveDate) -> Self {
        Self { days: vec![date] }
    }

    /// Seven days starting at the configured first day of the week
    pub fn week(anchor: NaiveDate, first_day_of_week: u8) -> Self {
        let start = week_start(anchor, first_day_of_week);
        Self {
            days: days_in_range(start, start + Duration::days(6)),
        }
    }

    /// Work week containing `anchor`, e.g. Monday (1) to Friday (5)
    pub fn work_week(anchor: NaiveDate, first_work_day: u8, last_work_day: u8) -> Self {
        let start = week_start(anchor, first_work_day);
        let len = i64::from(last_work_day.saturating_sub(first_work_day));
        Self {
            days: days_in_range(start, start + Duration::days(len)),
        }
    }

    /// Window shown by `view` around `anchor`.
    ///
    /// The week view collapses to the work week when weekends are hidden.
    pub fn for_view(view: ViewType, anchor: NaiveDate, settings: &LayoutSettings) -> Self {
        match view {
            ViewType::Day => Self::day(anchor),
            ViewType::Week if settings.show_weekends => {
                Self::week(anchor, settings.first_day_of_week)
            }
            ViewType::Week | ViewType::WorkWeek => Self::work_week(
                anchor,
                settings.first_day_of_work_week,
                settings.last_day_of_work_week,
            ),
        }
    }

    /// Build a window from arbitrary days; they are sorted and deduplicated
    /// but must form one contiguous run.
    pub fn from_days(days: impl IntoIterator<Item = NaiveDate>) -> Result<Self, WindowError> {
        let mut days: Vec<NaiveDate> = days.into_iter().collect();
        days.sort_unstable();
        days.dedup();

        if let Some(pair) = days
            .windows(2)
            .find(|pair| pair[1] - pair[0] != Duration::days(1))
        {
            return Err(WindowError::Gap {
                before: pair[0],
                after: pair[1],
            });
        }

        Ok(Self { days })
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Column of `date` within the window
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.first_day()?;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        (offset < self.days.len()).then_some(offset)
    }

    /// Half-open wall-clock bounds: first midnight to the midnight after the last day
    pub fn bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((start_of_day(self.first_day()?), end_of_day(self.last_day()?)))
    }
}
