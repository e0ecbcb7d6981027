//! Reporting windows and the period selectors that produce them.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Days, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Enumerates the reporting periods offered on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodSelector {
    Daily,
    Weekly,
    #[default]
    Monthly,
    HalfAnnual,
    Annual,
}

impl PeriodSelector {
    pub const ALL: [PeriodSelector; 5] = [
        PeriodSelector::Daily,
        PeriodSelector::Weekly,
        PeriodSelector::Monthly,
        PeriodSelector::HalfAnnual,
        PeriodSelector::Annual,
    ];

    /// Canonical selector value, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodSelector::Daily => "daily",
            PeriodSelector::Weekly => "weekly",
            PeriodSelector::Monthly => "monthly",
            PeriodSelector::HalfAnnual => "half-annual",
            PeriodSelector::Annual => "annual",
        }
    }

    /// Start of the period ending at `now`.
    ///
    /// Calendar boundaries are computed in UTC and weeks start on Sunday. The
    /// half-annual window reaches back five calendar months to the same day
    /// and time, clamped to the last day of shorter months.
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let days_back = match self {
            PeriodSelector::Daily => 0,
            PeriodSelector::Weekly => today.weekday().num_days_from_sunday(),
            PeriodSelector::Monthly => today.day0(),
            PeriodSelector::Annual => today.ordinal0(),
            PeriodSelector::HalfAnnual => {
                return now
                    .checked_sub_months(Months::new(5))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC);
            }
        };
        // Near the start of chrono's range the boundary may not exist.
        today
            .checked_sub_days(Days::new(u64::from(days_back)))
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Closed window `[start, now]` for this period.
    pub fn window(self, now: DateTime<Utc>) -> PeriodWindow {
        PeriodWindow {
            start: self.window_start(now),
            end: now,
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PeriodSelector::Daily => "Daily",
            PeriodSelector::Weekly => "Weekly",
            PeriodSelector::Monthly => "Monthly",
            PeriodSelector::HalfAnnual => "Half-annual",
            PeriodSelector::Annual => "Annual",
        };
        f.write_str(label)
    }
}

impl FromStr for PeriodSelector {
    type Err = PeriodParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['_', ' '], "-");
        PeriodSelector::ALL
            .into_iter()
            .find(|selector| selector.as_str() == normalized)
            .ok_or_else(|| PeriodParseError {
                input: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a string names none of the known period selectors.
pub struct PeriodParseError {
    pub input: String,
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown period selector `{}`", self.input)
    }
}

impl std::error::Error for PeriodParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Closed reporting window; both ends are inclusive.
pub struct PeriodWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, PeriodWindowError> {
        if end < start {
            return Err(PeriodWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Like [`contains`](Self::contains) but for possibly-undated records.
    pub fn contains_date(&self, date: Option<DateTime<Utc>>) -> bool {
        date.is_some_and(|instant| self.contains(instant))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`PeriodWindow`] values.
pub enum PeriodWindowError {
    InvalidRange,
}

impl fmt::Display for PeriodWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodWindowError::InvalidRange => f.write_str("period window end must not precede start"),
        }
    }
}

impl std::error::Error for PeriodWindowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn daily_starts_at_midnight() {
        let now = at(2025, 7, 16, 18, 42);
        assert_eq!(PeriodSelector::Daily.window_start(now), at(2025, 7, 16, 0, 0));
    }

    #[test]
    fn weekly_starts_on_most_recent_sunday() {
        // 2025-07-16 is a Wednesday.
        let now = at(2025, 7, 16, 18, 42);
        assert_eq!(PeriodSelector::Weekly.window_start(now), at(2025, 7, 13, 0, 0));

        // On a Sunday the week starts the same day.
        let sunday = at(2025, 7, 13, 6, 0);
        assert_eq!(PeriodSelector::Weekly.window_start(sunday), at(2025, 7, 13, 0, 0));
    }

    #[test]
    fn monthly_and_annual_start_on_first_day() {
        let now = at(2025, 7, 16, 18, 42);
        assert_eq!(PeriodSelector::Monthly.window_start(now), at(2025, 7, 1, 0, 0));
        assert_eq!(PeriodSelector::Annual.window_start(now), at(2025, 1, 1, 0, 0));
    }

    #[test]
    fn half_annual_goes_back_five_months_with_clamping() {
        let now = at(2025, 7, 16, 18, 42);
        assert_eq!(PeriodSelector::HalfAnnual.window_start(now), at(2025, 2, 16, 18, 42));

        let end_of_july = at(2025, 7, 31, 12, 0);
        assert_eq!(
            PeriodSelector::HalfAnnual.window_start(end_of_july),
            at(2025, 2, 28, 12, 0)
        );

        let leap = at(2024, 7, 30, 12, 0);
        assert_eq!(PeriodSelector::HalfAnnual.window_start(leap), at(2024, 2, 29, 12, 0));

        let january = at(2025, 1, 10, 8, 0);
        assert_eq!(PeriodSelector::HalfAnnual.window_start(january), at(2024, 8, 10, 8, 0));
    }

    #[test]
    fn windows_at_earliest_instant_clamp_to_range_start() {
        let earliest = DateTime::<Utc>::MIN_UTC;
        for period in PeriodSelector::ALL {
            let window = period.window(earliest);
            assert_eq!(window.start, earliest, "{period}");
            assert_eq!(window.end, earliest);
            assert!(window.contains(earliest));
        }
    }

    #[test]
    fn windows_near_earliest_date_never_precede_range_start() {
        let now = DateTime::<Utc>::MIN_UTC + chrono::Duration::days(3);
        for period in PeriodSelector::ALL {
            let window = period.window(now);
            assert!(window.start >= DateTime::<Utc>::MIN_UTC, "{period}");
            assert!(window.start <= window.end, "{period}");
        }
    }

    #[test]
    fn window_is_inclusive_of_both_ends() {
        let now = at(2025, 7, 16, 18, 42);
        let window = PeriodSelector::Daily.window(now);
        assert!(window.contains(at(2025, 7, 16, 0, 0)));
        assert!(window.contains(now));
        assert!(!window.contains(now + chrono::Duration::seconds(1)));
        assert!(!window.contains(at(2025, 7, 15, 23, 59)));
        assert!(!window.contains_date(None));
    }

    #[test]
    fn parses_selectors_leniently() {
        assert_eq!("daily".parse::<PeriodSelector>(), Ok(PeriodSelector::Daily));
        assert_eq!(" Weekly ".parse::<PeriodSelector>(), Ok(PeriodSelector::Weekly));
        assert_eq!("half_annual".parse::<PeriodSelector>(), Ok(PeriodSelector::HalfAnnual));
        assert_eq!("HALF-ANNUAL".parse::<PeriodSelector>(), Ok(PeriodSelector::HalfAnnual));
        assert!("fortnightly".parse::<PeriodSelector>().is_err());
    }

    #[test]
    fn serializes_as_kebab_case() {
        let json = serde_json::to_string(&PeriodSelector::HalfAnnual).unwrap();
        assert_eq!(json, "\"half-annual\"");
    }

    #[test]
    fn custom_window_rejects_inverted_range() {
        let start = at(2025, 7, 16, 0, 0);
        let end = at(2025, 7, 1, 0, 0);
        assert_eq!(PeriodWindow::new(start, end), Err(PeriodWindowError::InvalidRange));
        assert!(PeriodWindow::new(end, start).is_ok());
    }
}
