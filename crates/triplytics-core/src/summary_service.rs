//! Dashboard-level reports built on top of the period aggregator.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use triplytics_domain::{PeriodSelector, PeriodWindow, TripSnapshot};

use crate::{
    format::round_to_cents,
    period_aggregator::{PeriodAggregator, PeriodSummary, VehicleRates},
    time::Clock,
};

/// Label used for trips recorded without a platform.
pub const UNSPECIFIED_PLATFORM: &str = "Unspecified";

/// Summary for one selector together with the window it covered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub period: PeriodSelector,
    pub window: PeriodWindow,
    pub summary: PeriodSummary,
}

/// One profit card per period plus the vehicle's fuel position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub generated_at: DateTime<Utc>,
    pub periods: Vec<PeriodReport>,
    pub fuel: FuelStatus,
}

impl PeriodReport {
    pub fn rounded(&self) -> Self {
        Self {
            summary: self.summary.rounded(),
            ..*self
        }
    }
}

impl Dashboard {
    pub fn report(&self, period: PeriodSelector) -> Option<&PeriodReport> {
        self.periods.iter().find(|report| report.period == period)
    }

    pub fn rounded(&self) -> Self {
        Self {
            generated_at: self.generated_at,
            periods: self.periods.iter().map(PeriodReport::rounded).collect(),
            fuel: self.fuel.rounded(),
        }
    }
}

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub net_profit: f64,
    pub total_income: f64,
    pub estimated_fuel_cost: f64,
    pub ancillary_expenses: f64,
    pub trip_count: usize,
}

impl MonthlySummary {
    pub fn rounded(&self) -> Self {
        Self {
            net_profit: round_to_cents(self.net_profit),
            total_income: round_to_cents(self.total_income),
            estimated_fuel_cost: round_to_cents(self.estimated_fuel_cost),
            ancillary_expenses: round_to_cents(self.ancillary_expenses),
            ..self.clone()
        }
    }
}

/// Totals for one ride platform inside a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSummary {
    pub platform: String,
    pub net_profit: f64,
    pub total_income: f64,
    pub estimated_fuel_cost: f64,
    pub ancillary_expenses: f64,
    pub trip_count: usize,
}

impl PlatformSummary {
    pub fn rounded(&self) -> Self {
        Self {
            platform: self.platform.clone(),
            net_profit: round_to_cents(self.net_profit),
            total_income: round_to_cents(self.total_income),
            estimated_fuel_cost: round_to_cents(self.estimated_fuel_cost),
            ancillary_expenses: round_to_cents(self.ancillary_expenses),
            trip_count: self.trip_count,
        }
    }
}

/// Fuel purchased versus fuel burnt over the vehicle's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelStatus {
    pub mileage: f64,
    pub purchased_litres: f64,
    pub purchase_cost: f64,
    pub average_price_per_litre: f64,
    pub consumed_litres: f64,
    pub remaining_litres: f64,
}

impl FuelStatus {
    pub fn rounded(&self) -> Self {
        Self {
            mileage: round_to_cents(self.mileage),
            purchased_litres: round_to_cents(self.purchased_litres),
            purchase_cost: round_to_cents(self.purchase_cost),
            average_price_per_litre: round_to_cents(self.average_price_per_litre),
            consumed_litres: round_to_cents(self.consumed_litres),
            remaining_litres: round_to_cents(self.remaining_litres),
        }
    }

    /// Whether estimated consumption has outrun recorded purchases.
    pub fn is_overdrawn(&self) -> bool {
        self.remaining_litres < 0.0
    }
}

/// Aggregates snapshot data for dashboard and reporting scenarios.
///
/// See also: [`PeriodAggregator`] for the single-window computation.
pub struct SummaryService;

impl SummaryService {
    /// Summarizes one period as seen from `now`.
    pub fn period(snapshot: &TripSnapshot, period: PeriodSelector, now: DateTime<Utc>) -> PeriodReport {
        let window = period.window(now);
        PeriodReport {
            period,
            window,
            summary: PeriodAggregator::aggregate_window(&snapshot.trips, snapshot.vehicle(), window),
        }
    }

    /// Builds every profit card for `now`.
    pub fn dashboard(snapshot: &TripSnapshot, now: DateTime<Utc>) -> Dashboard {
        Dashboard {
            generated_at: now,
            periods: PeriodSelector::ALL
                .into_iter()
                .map(|period| Self::period(snapshot, period, now))
                .collect(),
            fuel: Self::fuel_status(snapshot),
        }
    }

    /// Same as [`dashboard`](Self::dashboard) with "now" read from `clock`.
    pub fn dashboard_with_clock(snapshot: &TripSnapshot, clock: &dyn Clock) -> Dashboard {
        Self::dashboard(snapshot, clock.now())
    }

    /// Groups dated trips by calendar month, newest month first.
    pub fn monthly_breakdown(snapshot: &TripSnapshot) -> Vec<MonthlySummary> {
        let vehicle = snapshot.vehicle();
        let rates = VehicleRates::for_vehicle(vehicle);
        let mut months: BTreeMap<(i32, u32), PeriodSummary> = BTreeMap::new();
        for trip in &snapshot.trips {
            let Some(date) = trip.date else { continue };
            months
                .entry((date.year(), date.month()))
                .or_default()
                .absorb(trip, &rates.estimate(trip, vehicle));
        }
        months
            .into_iter()
            .rev()
            .map(|((year, month), totals)| MonthlySummary {
                year,
                month,
                net_profit: totals.net_profit,
                total_income: totals.total_income,
                estimated_fuel_cost: totals.estimated_fuel_cost,
                ancillary_expenses: totals.ancillary_expenses,
                trip_count: totals.trip_count,
            })
            .collect()
    }

    /// Groups the trips in `window` by platform, most profitable first.
    pub fn platform_breakdown(snapshot: &TripSnapshot, window: PeriodWindow) -> Vec<PlatformSummary> {
        let vehicle = snapshot.vehicle();
        let rates = VehicleRates::for_vehicle(vehicle);
        let mut platforms: HashMap<String, PeriodSummary> = HashMap::new();
        for trip in snapshot
            .trips
            .iter()
            .filter(|trip| window.contains_date(trip.date))
        {
            let platform = trip
                .platform
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(UNSPECIFIED_PLATFORM)
                .to_string();
            platforms
                .entry(platform)
                .or_default()
                .absorb(trip, &rates.estimate(trip, vehicle));
        }
        let mut rows: Vec<PlatformSummary> = platforms
            .into_iter()
            .map(|(platform, totals)| PlatformSummary {
                platform,
                net_profit: totals.net_profit,
                total_income: totals.total_income,
                estimated_fuel_cost: totals.estimated_fuel_cost,
                ancillary_expenses: totals.ancillary_expenses,
                trip_count: totals.trip_count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.net_profit
                .total_cmp(&a.net_profit)
                .then_with(|| a.platform.cmp(&b.platform))
        });
        rows
    }

    /// Lifetime fuel position of the snapshot's vehicle.
    pub fn fuel_status(snapshot: &TripSnapshot) -> FuelStatus {
        let vehicle = snapshot.vehicle();
        let rates = VehicleRates::for_vehicle(vehicle);
        let consumed = PeriodAggregator::lifetime_consumption(&snapshot.trips, vehicle, &rates);
        FuelStatus {
            mileage: rates.mileage,
            purchased_litres: rates.ledger.total_litres,
            purchase_cost: rates.ledger.total_cost,
            average_price_per_litre: rates.ledger.average_price_per_litre,
            consumed_litres: consumed,
            remaining_litres: rates.ledger.total_litres - consumed,
        }
    }
}
