use serde::{Deserialize, Serialize};

use crate::{trip::TripRecord, vehicle::Vehicle};

/// Read-only view of one user's data handed to the profit computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSnapshot {
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub trips: Vec<TripRecord>,
}

impl TripSnapshot {
    pub fn new(vehicle: Option<Vehicle>, trips: Vec<TripRecord>) -> Self {
        Self { vehicle, trips }
    }

    pub fn vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
