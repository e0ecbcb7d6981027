//! Per-trip fuel cost and profit estimation.

use serde::{Deserialize, Serialize};
use triplytics_domain::TripRecord;

use crate::fuel_ledger::finite_or_zero;

/// Fuel and profit figures for a single trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TripEstimate {
    pub estimated_fuel_consumed_litres: f64,
    pub estimated_fuel_cost: f64,
    /// Income minus fuel cost minus ancillary expenses. Negative for a losing trip.
    pub net_profit: f64,
}

pub struct TripCostEstimator;

impl TripCostEstimator {
    /// Estimates the fuel burnt on `trip` and the profit left after costs.
    ///
    /// Fuel is only estimated when mileage, distance and average price are all
    /// positive. If any is missing the trip is charged no fuel at all.
    pub fn estimate(
        trip: &TripRecord,
        mileage: f64,
        average_price_per_litre: f64,
    ) -> TripEstimate {
        let distance = finite_or_zero(trip.distance);
        let (consumed, fuel_cost) =
            if mileage > 0.0 && distance > 0.0 && average_price_per_litre > 0.0 {
                let consumed = distance / mileage;
                (consumed, consumed * average_price_per_litre)
            } else {
                (0.0, 0.0)
            };
        let consumed = finite_or_zero(consumed);
        let fuel_cost = finite_or_zero(fuel_cost);
        TripEstimate {
            estimated_fuel_consumed_litres: consumed,
            estimated_fuel_cost: fuel_cost,
            net_profit: finite_or_zero(trip.income)
                - fuel_cost
                - finite_or_zero(trip.ancillary_expenses),
        }
    }
}
