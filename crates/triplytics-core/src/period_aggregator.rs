//! Period profit aggregation over a trip snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triplytics_domain::{PeriodSelector, PeriodWindow, TripRecord, Vehicle};

use crate::{
    error::CoreError,
    format::round_to_cents,
    fuel_ledger::{finite_or_zero, FuelLedger, FuelLedgerSummary},
    trip_cost::{TripCostEstimator, TripEstimate},
};

/// Profit figures for one reporting window.
///
/// Values are kept at full precision; call [`PeriodSummary::rounded`] before
/// display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub net_profit: f64,
    pub total_income: f64,
    pub estimated_fuel_cost: f64,
    pub ancillary_expenses: f64,
    pub trip_count: usize,
    /// Purchased litres minus everything the vehicle's trips have burnt so
    /// far. Independent of the window.
    pub fuel_remaining_litres: f64,
}

impl PeriodSummary {
    /// Copy with money and volume rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            net_profit: round_to_cents(self.net_profit),
            total_income: round_to_cents(self.total_income),
            estimated_fuel_cost: round_to_cents(self.estimated_fuel_cost),
            ancillary_expenses: round_to_cents(self.ancillary_expenses),
            trip_count: self.trip_count,
            fuel_remaining_litres: round_to_cents(self.fuel_remaining_litres),
        }
    }

    pub(crate) fn absorb(&mut self, trip: &TripRecord, estimate: &TripEstimate) {
        self.total_income += finite_or_zero(trip.income);
        self.estimated_fuel_cost += estimate.estimated_fuel_cost;
        self.ancillary_expenses += finite_or_zero(trip.ancillary_expenses);
        self.net_profit += estimate.net_profit;
        self.trip_count += 1;
    }
}

/// Vehicle inputs shared by every trip of one computation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VehicleRates {
    pub mileage: f64,
    pub ledger: FuelLedgerSummary,
}

impl VehicleRates {
    /// Reads the vehicle once; a missing vehicle yields zero mileage and an
    /// empty ledger.
    pub fn for_vehicle(vehicle: Option<&Vehicle>) -> Self {
        match vehicle {
            Some(vehicle) => Self {
                mileage: finite_or_zero(vehicle.mileage),
                ledger: FuelLedger::summarize(&vehicle.fuel_purchases),
            },
            None => Self::default(),
        }
    }

    /// Estimate for `trip`, charging fuel only when the trip runs on `vehicle`.
    pub fn estimate(&self, trip: &TripRecord, vehicle: Option<&Vehicle>) -> TripEstimate {
        let mileage = match vehicle {
            Some(vehicle) if trip.is_associated_with(vehicle) => self.mileage,
            _ => 0.0,
        };
        TripCostEstimator::estimate(trip, mileage, self.ledger.average_price_per_litre)
    }
}

pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Summarizes the trips that fall in `period` as seen from `now`.
    pub fn aggregate(
        trips: &[TripRecord],
        vehicle: Option<&Vehicle>,
        period: PeriodSelector,
        now: DateTime<Utc>,
    ) -> PeriodSummary {
        Self::aggregate_window(trips, vehicle, period.window(now))
    }

    /// Summarizes the trips dated inside `window`. Undated trips are skipped.
    pub fn aggregate_window(
        trips: &[TripRecord],
        vehicle: Option<&Vehicle>,
        window: PeriodWindow,
    ) -> PeriodSummary {
        let rates = VehicleRates::for_vehicle(vehicle);
        let mut summary = trips
            .iter()
            .filter(|trip| window.contains_date(trip.date))
            .fold(PeriodSummary::default(), |mut summary, trip| {
                summary.absorb(trip, &rates.estimate(trip, vehicle));
                summary
            });
        summary.fuel_remaining_litres =
            rates.ledger.total_litres - Self::lifetime_consumption(trips, vehicle, &rates);
        summary
    }

    /// Summarizes an arbitrary `[start, end]` range, rejecting inverted ranges.
    pub fn aggregate_between(
        trips: &[TripRecord],
        vehicle: Option<&Vehicle>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PeriodSummary, CoreError> {
        let window = PeriodWindow::new(start, end)?;
        Ok(Self::aggregate_window(trips, vehicle, window))
    }

    /// Litres burnt by every trip associated with `vehicle`, dated or not.
    pub fn lifetime_consumption(
        trips: &[TripRecord],
        vehicle: Option<&Vehicle>,
        rates: &VehicleRates,
    ) -> f64 {
        trips
            .iter()
            .map(|trip| rates.estimate(trip, vehicle).estimated_fuel_consumed_litres)
            .sum()
    }
}
