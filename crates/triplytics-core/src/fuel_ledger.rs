//! Reduction of a vehicle's fuel purchases to volume and price figures.

use serde::{Deserialize, Serialize};
use triplytics_domain::FuelPurchaseEntry;

/// Totals derived from a fuel-purchase history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelLedgerSummary {
    pub total_litres: f64,
    pub total_cost: f64,
    /// `total_cost / total_litres`, or `0.0` when nothing was purchased.
    pub average_price_per_litre: f64,
}

pub struct FuelLedger;

impl FuelLedger {
    /// Sums litres and spend across `purchases` and derives the average price.
    ///
    /// Non-finite fields read as zero. Negative values are summed as given;
    /// clamping belongs to whoever built the entries.
    pub fn summarize(purchases: &[FuelPurchaseEntry]) -> FuelLedgerSummary {
        let (total_litres, total_cost) =
            purchases
                .iter()
                .fold((0.0_f64, 0.0_f64), |(litres, cost), entry| {
                    let entry_litres = finite_or_zero(entry.litres);
                    let entry_price = finite_or_zero(entry.price_per_litre);
                    (litres + entry_litres, cost + entry_litres * entry_price)
                });
        let average_price_per_litre = if total_litres > 0.0 {
            total_cost / total_litres
        } else {
            0.0
        };
        FuelLedgerSummary {
            total_litres,
            total_cost,
            average_price_per_litre,
        }
    }
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triplytics_domain::FuelKind;

    fn entry(litres: f64, price: f64) -> FuelPurchaseEntry {
        FuelPurchaseEntry {
            fuel_kind: FuelKind::Petrol,
            litres,
            price_per_litre: price,
        }
    }

    #[test]
    fn empty_ledger_has_no_price() {
        let summary = FuelLedger::summarize(&[]);
        assert_eq!(summary, FuelLedgerSummary::default());
    }

    #[test]
    fn zero_litre_entries_do_not_divide_by_zero() {
        let summary = FuelLedger::summarize(&[entry(0.0, 105.0), entry(0.0, 98.0)]);
        assert_eq!(summary.total_litres, 0.0);
        assert_eq!(summary.average_price_per_litre, 0.0);
        assert!(summary.average_price_per_litre.is_finite());
    }

    #[test]
    fn average_price_is_volume_weighted() {
        let summary = FuelLedger::summarize(&[entry(10.0, 100.0), entry(30.0, 80.0)]);
        assert_eq!(summary.total_litres, 40.0);
        assert_eq!(summary.total_cost, 3400.0);
        assert_eq!(summary.average_price_per_litre, 85.0);
    }

    #[test]
    fn non_finite_fields_read_as_zero() {
        let summary = FuelLedger::summarize(&[entry(f64::NAN, 100.0), entry(5.0, f64::INFINITY)]);
        assert_eq!(summary.total_litres, 5.0);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.average_price_per_litre, 0.0);
    }

    #[test]
    fn summary_ignores_entry_order() {
        let entries = vec![entry(12.5, 101.2), entry(7.0, 96.4), entry(3.25, 110.0)];
        let mut reversed = entries.clone();
        reversed.reverse();
        let rotated = vec![entries[1].clone(), entries[2].clone(), entries[0].clone()];

        let base = FuelLedger::summarize(&entries);
        for permutation in [reversed, rotated] {
            let other = FuelLedger::summarize(&permutation);
            assert!((base.total_litres - other.total_litres).abs() < 1e-9);
            assert!((base.total_cost - other.total_cost).abs() < 1e-9);
            assert!(
                (base.average_price_per_litre - other.average_price_per_litre).abs() < 1e-9
            );
        }
    }
}
