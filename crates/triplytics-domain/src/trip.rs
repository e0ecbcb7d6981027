//! Per-ride income and expense records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, vehicle::Vehicle};

/// One ride as recorded by the driver.
///
/// `date` is `None` when the stored timestamp could not be parsed; such trips
/// never fall inside a reporting period but still count towards lifetime fuel
/// consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    pub id: Uuid,
    #[serde(default)]
    pub vehicle_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_trip_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub income: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub distance: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub ancillary_expenses: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl TripRecord {
    pub fn new(date: DateTime<Utc>, income: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id: None,
            date: Some(date),
            income: sanitize_amount(income),
            distance: 0.0,
            ancillary_expenses: 0.0,
            platform: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = sanitize_amount(distance);
        self
    }

    pub fn with_ancillary_expenses(mut self, amount: f64) -> Self {
        self.ancillary_expenses = sanitize_amount(amount);
        self
    }

    pub fn with_vehicle(mut self, vehicle_id: Uuid) -> Self {
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Whether the trip's fuel should be charged against `vehicle`.
    ///
    /// Unassigned trips belong to the owner's only vehicle.
    pub fn is_associated_with(&self, vehicle: &Vehicle) -> bool {
        match self.vehicle_id {
            Some(id) => id == vehicle.id,
            None => true,
        }
    }
}

impl Identifiable for TripRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn builder_clamps_amounts() {
        let date = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
        let trip = TripRecord::new(date, -10.0)
            .with_distance(f64::NAN)
            .with_ancillary_expenses(35.0);
        assert_eq!(trip.income, 0.0);
        assert_eq!(trip.distance, 0.0);
        assert_eq!(trip.ancillary_expenses, 35.0);
    }

    #[test]
    fn unassigned_trips_belong_to_any_vehicle() {
        let vehicle = Vehicle::new("Swift", 18.0);
        let other = Vehicle::new("Activa", 45.0);
        let date = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();

        let unassigned = TripRecord::new(date, 100.0);
        let assigned = TripRecord::new(date, 100.0).with_vehicle(vehicle.id);

        assert!(unassigned.is_associated_with(&vehicle));
        assert!(assigned.is_associated_with(&vehicle));
        assert!(!assigned.is_associated_with(&other));
    }

    #[test]
    fn non_numeric_distance_deserializes_as_zero() {
        let json = r#"{
            "id": "0b6f7d61-2c55-4c1e-9d0c-4f2b3c1a9e10",
            "date": "2025-05-01",
            "income": 250,
            "distance": "abc"
        }"#;
        let trip: TripRecord = serde_json::from_str(json).expect("trip parses");
        assert_eq!(trip.distance, 0.0);
        assert_eq!(trip.income, 250.0);
        assert_eq!(trip.ancillary_expenses, 0.0);
        assert!(trip.date.is_some());
    }
}
