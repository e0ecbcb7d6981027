use chrono::{DateTime, Utc};
use triplytics_domain::{PeriodSelector, PeriodWindow};

/// Source of "now" for period windows; swap in [`FixedClock`] for reproducible reports.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Window of `period` ending at this clock's current instant.
    fn window(&self, period: PeriodSelector) -> PeriodWindow {
        period.window(self.now())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pinned to one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
