mod common;

use assert_fs::prelude::*;
use chrono::{TimeZone, Utc};
use triplytics::core::{PeriodAggregator, SummaryService};
use triplytics::domain::{PeriodSelector, TripSnapshot};
use triplytics_storage_json::{load_snapshot, save_snapshot};

use common::LEGACY_DOCUMENT;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 17, 15, 30, 0).unwrap()
}

#[test]
fn legacy_document_loads_with_malformed_trip_kept() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("rides.json");
    file.write_str(LEGACY_DOCUMENT).unwrap();

    let snapshot = load_snapshot(file.path()).expect("load");
    assert_eq!(snapshot.trips.len(), 4);
    assert_eq!(snapshot.trips.iter().filter(|trip| trip.date.is_none()).count(), 1);
    assert_eq!(snapshot.trips[1].income, 300.0);
    assert_eq!(snapshot.trips[0].ancillary_expenses, 50.0);
}

#[test]
fn canonical_rewrite_preserves_every_figure() {
    let dir = assert_fs::TempDir::new().unwrap();
    let legacy = dir.child("legacy.json");
    legacy.write_str(LEGACY_DOCUMENT).unwrap();
    let canonical = dir.child("out/canonical.json");

    let original = load_snapshot(legacy.path()).expect("load legacy");
    save_snapshot(&original, canonical.path()).expect("save canonical");
    canonical.assert(predicates::str::contains("\"fuelPurchases\""));

    let reloaded: TripSnapshot = load_snapshot(canonical.path()).expect("reload");
    assert_eq!(reloaded, original);
    assert_eq!(
        SummaryService::dashboard(&reloaded, now()),
        SummaryService::dashboard(&original, now())
    );
}

#[test]
fn undated_trip_only_counts_toward_fuel() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("undated.json");
    file.write_str(
        r#"{
            "vehicle": {"name": "Activa", "mileage": 40,
                        "fuelPurchases": [{"fuelKind": "Petrol", "litres": 4, "pricePerLitre": 105}]},
            "trips": [{"income": 90, "distance": 40, "date": ""}]
        }"#,
    )
    .unwrap();

    let snapshot = load_snapshot(file.path()).expect("load");
    for period in PeriodSelector::ALL {
        let summary = PeriodAggregator::aggregate(&snapshot.trips, snapshot.vehicle(), period, now());
        assert_eq!(summary.trip_count, 0);
        assert_eq!(summary.net_profit, 0.0);
        assert_eq!(summary.fuel_remaining_litres, 3.0);
    }
}
