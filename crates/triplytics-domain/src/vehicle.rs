//! Vehicle records and their fuel-purchase ledger.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Fuel grades seen in purchase records. The set is open; unknown labels are
/// preserved verbatim in [`FuelKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FuelKind {
    #[default]
    Petrol,
    Diesel,
    Cng,
    Electricity,
    Other(String),
}

impl From<String> for FuelKind {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "petrol" | "gasoline" => FuelKind::Petrol,
            "diesel" => FuelKind::Diesel,
            "cng" => FuelKind::Cng,
            "electricity" | "electric" | "ev" => FuelKind::Electricity,
            _ => FuelKind::Other(value.trim().to_string()),
        }
    }
}

impl From<&str> for FuelKind {
    fn from(value: &str) -> Self {
        FuelKind::from(value.to_string())
    }
}

impl From<FuelKind> for String {
    fn from(value: FuelKind) -> Self {
        value.to_string()
    }
}

impl fmt::Display for FuelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FuelKind::Petrol => "Petrol",
            FuelKind::Diesel => "Diesel",
            FuelKind::Cng => "CNG",
            FuelKind::Electricity => "Electricity",
            FuelKind::Other(label) => label.as_str(),
        };
        f.write_str(label)
    }
}

/// One fuel purchase: how much was bought and at what unit price.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelPurchaseEntry {
    #[serde(default)]
    pub fuel_kind: FuelKind,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub litres: f64,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price_per_litre: f64,
}

impl FuelPurchaseEntry {
    pub fn new(fuel_kind: impl Into<FuelKind>, litres: f64, price_per_litre: f64) -> Self {
        Self {
            fuel_kind: fuel_kind.into(),
            litres: sanitize_amount(litres),
            price_per_litre: sanitize_amount(price_per_litre),
        }
    }

    /// Amount paid for this purchase.
    pub fn cost(&self) -> f64 {
        self.litres * self.price_per_litre
    }
}

/// The vehicle fields the profit computation reads.
///
/// `mileage` is distance per litre; `0.0` means the owner has not set it and
/// no fuel cost can be estimated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub mileage: f64,
    #[serde(default)]
    pub fuel_purchases: Vec<FuelPurchaseEntry>,
}

impl Vehicle {
    pub fn new(name: impl Into<String>, mileage: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mileage: sanitize_amount(mileage),
            fuel_purchases: Vec::new(),
        }
    }

    pub fn with_purchase(mut self, entry: FuelPurchaseEntry) -> Self {
        self.fuel_purchases.push(entry);
        self
    }

    pub fn add_purchase(&mut self, entry: FuelPurchaseEntry) {
        self.fuel_purchases.push(entry);
    }

    /// Whether fuel cost can be estimated at all for this vehicle.
    pub fn has_mileage(&self) -> bool {
        self.mileage > 0.0
    }
}

impl Identifiable for Vehicle {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuel_kind_round_trips_known_and_custom_labels() {
        assert_eq!(FuelKind::from("diesel"), FuelKind::Diesel);
        assert_eq!(FuelKind::from(" CNG "), FuelKind::Cng);
        assert_eq!(FuelKind::from("Hydrogen"), FuelKind::Other("Hydrogen".into()));
        assert_eq!(String::from(FuelKind::Cng), "CNG");

        let json = serde_json::to_string(&FuelKind::Electricity).unwrap();
        assert_eq!(json, "\"Electricity\"");
    }

    #[test]
    fn purchase_constructor_clamps_negative_values() {
        let entry = FuelPurchaseEntry::new(FuelKind::Petrol, -5.0, 102.5);
        assert_eq!(entry.litres, 0.0);
        assert_eq!(entry.price_per_litre, 102.5);
        assert_eq!(entry.cost(), 0.0);
    }

    #[test]
    fn vehicle_deserializes_with_malformed_fields() {
        let json = r#"{
            "id": "6f0c2f7e-8a4d-4a54-9a55-0d1f1c0f2b11",
            "mileage": "n/a",
            "fuelPurchases": [
                {"fuelKind": "Diesel", "litres": "12", "pricePerLitre": 90},
                {"litres": null}
            ]
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).expect("vehicle parses");
        assert_eq!(vehicle.mileage, 0.0);
        assert!(!vehicle.has_mileage());
        assert_eq!(vehicle.fuel_purchases.len(), 2);
        assert_eq!(vehicle.fuel_purchases[0].litres, 12.0);
        assert_eq!(vehicle.fuel_purchases[1], FuelPurchaseEntry::default());
    }
}
