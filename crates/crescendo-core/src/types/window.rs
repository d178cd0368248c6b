//! Calendar-date query window for the release index.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A day-granular date interval, optionally unbounded at the upper end.
///
/// Both bounds are inclusive. `to = None` means "from `from` onwards", the
/// shape of the announcement-date query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseWindow {
    /// First day of the window (inclusive).
    pub from: NaiveDate,
    /// Last day of the window (inclusive), or `None` for unbounded.
    pub to: Option<NaiveDate>,
}

impl ReleaseWindow {
    /// A bounded window `[from, to]`.
    pub fn bounded(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to: Some(to),
        }
    }

    /// An unbounded window `[from, ∞)`.
    pub fn starting_at(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    /// The single-day window `[day, day]`.
    pub fn single_day(day: NaiveDate) -> Self {
        Self::bounded(day, day)
    }

    /// The upcoming window `[today, today + weeks]`.
    pub fn weeks_ahead(today: NaiveDate, weeks: i32) -> Self {
        Self::bounded(today, today + Duration::weeks(i64::from(weeks)))
    }

    /// The lookback window `[today - weeks, today - 1 day]`.
    ///
    /// With `weeks == 0` the bounds invert and the window is empty; callers
    /// get no results rather than an error.
    pub fn weeks_behind(today: NaiveDate, weeks: i32) -> Self {
        Self::bounded(
            today - Duration::weeks(i64::from(weeks)),
            today - Duration::days(1),
        )
    }

    /// Whether a day falls inside the window.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.from && self.to.is_none_or(|to| day <= to)
    }

    /// Whether the window can match any day at all.
    pub fn is_empty(&self) -> bool {
        self.to.is_some_and(|to| to < self.from)
    }
}
