use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;
use triplytics::core::{PeriodAggregator, SummaryService};
use triplytics::domain::{FuelPurchaseEntry, PeriodSelector, TripRecord, TripSnapshot, Vehicle};
use triplytics_storage_json::{load_snapshot, save_snapshot};

fn build_sample_snapshot(trip_count: usize) -> TripSnapshot {
    let mut vehicle = Vehicle::new("Benchmark", 18.5);
    for idx in 0..52 {
        vehicle.add_purchase(FuelPurchaseEntry::new("Petrol", 30.0, 95.0 + (idx % 10) as f64));
    }

    let start = Utc.with_ymd_and_hms(2024, 7, 1, 6, 0, 0).unwrap();
    let trips = (0..trip_count)
        .map(|idx| {
            let date = start + Duration::hours((idx * 2) as i64);
            let trip = TripRecord::new(date, 150.0 + (idx % 400) as f64)
                .with_distance(5.0 + (idx % 30) as f64)
                .with_ancillary_expenses((idx % 5) as f64 * 10.0)
                .with_platform(if idx % 2 == 0 { "Uber" } else { "Ola" });
            if idx % 3 == 0 {
                trip.with_vehicle(vehicle.id)
            } else {
                trip
            }
        })
        .collect();

    TripSnapshot::new(Some(vehicle), trips)
}

fn bench_aggregation(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(5_000));
    let now = Utc.with_ymd_and_hms(2025, 7, 17, 15, 30, 0).unwrap();

    c.bench_function("aggregate_monthly_5k", |b| {
        b.iter(|| {
            let summary = PeriodAggregator::aggregate(
                &snapshot.trips,
                snapshot.vehicle(),
                PeriodSelector::Monthly,
                now,
            );
            black_box(summary);
        })
    });

    c.bench_function("dashboard_5k", |b| {
        b.iter(|| black_box(SummaryService::dashboard(&snapshot, now)))
    });

    c.bench_function("monthly_breakdown_5k", |b| {
        b.iter(|| black_box(SummaryService::monthly_breakdown(&snapshot)))
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(5_000));
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snapshot.json");

    c.bench_function("snapshot_save_5k", |b| {
        b.iter(|| save_snapshot(&snapshot, &path).expect("save snapshot"))
    });

    save_snapshot(&snapshot, &path).expect("seed");

    c.bench_function("snapshot_load_5k", |b| {
        b.iter(|| black_box(load_snapshot(&path).expect("load snapshot")))
    });
}

criterion_group!(benches, bench_aggregation, bench_snapshot_io);
criterion_main!(benches);
