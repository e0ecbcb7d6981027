//! Maps persisted user data, in any of its historical layouts, onto the
//! canonical [`TripSnapshot`].
//!
//! Layouts seen in stored documents:
//!
//! * vehicle as a single object, a one-element array, `{}` or absent, either at
//!   the top level or nested under `profile`/`user`;
//! * fuel entries under `fuelPurchases` or `fuelEntries`, kind under
//!   `fuelKind`, `type` or `fuelType`;
//! * rides under `trips` or `expenses`, income under `income`, `amount` or
//!   `fare`, platform under `platform` or `title`;
//! * ancillary costs either as `ancillaryExpenses` or split across
//!   `extraExpenses`, `otherExpenses` and `others`;
//! * identifiers as UUIDs, plain strings or `{"$oid": ...}` objects.

use serde_json::{Map, Value};
use tracing::{debug, warn};
use triplytics_domain::{
    deserialize_amount, deserialize_trip_date, record_id_from, FuelKind, FuelPurchaseEntry,
    TripRecord, TripSnapshot, Vehicle,
};
use uuid::Uuid;

use crate::StorageError;

const SPLIT_ANCILLARY_KEYS: [&str; 3] = ["extraExpenses", "otherExpenses", "others"];

/// Counts of records that needed repair while adapting a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdaptReport {
    pub trips: usize,
    pub undated_trips: usize,
    pub coerced_fields: usize,
    pub extra_vehicles: usize,
}

/// Adapts a parsed JSON document into a snapshot.
pub fn adapt_document(document: &Value) -> Result<(TripSnapshot, AdaptReport), StorageError> {
    let mut report = AdaptReport::default();
    let (vehicle_value, trips_value) = match document {
        Value::Object(root) => (locate_vehicle(root), locate_trips(root)),
        Value::Array(_) => (None, Some(document)),
        other => {
            return Err(StorageError::Layout(format!(
                "expected an object or an array, found {}",
                kind_of(other)
            )))
        }
    };

    let vehicle = vehicle_value.and_then(|value| adapt_vehicle(value, &mut report));
    let trips = match trips_value {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| adapt_trip(idx, item, vehicle.as_ref(), &mut report))
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(StorageError::Layout(format!(
                "trips must be an array, found {}",
                kind_of(other)
            )))
        }
    };
    report.trips = trips.len();
    Ok((TripSnapshot::new(vehicle, trips), report))
}

fn locate_vehicle(root: &Map<String, Value>) -> Option<&Value> {
    for key in ["vehicle", "vehicles"] {
        if let Some(value) = root.get(key) {
            return Some(value);
        }
    }
    ["profile", "user"]
        .iter()
        .filter_map(|key| root.get(*key))
        .find_map(|nested| nested.get("vehicle").or_else(|| nested.get("vehicles")))
}

fn locate_trips(root: &Map<String, Value>) -> Option<&Value> {
    root.get("trips").or_else(|| root.get("expenses"))
}

fn adapt_vehicle(value: &Value, report: &mut AdaptReport) -> Option<Vehicle> {
    let object = match value {
        Value::Object(object) => object,
        Value::Array(items) => {
            let mut objects = items.iter().filter_map(Value::as_object);
            let first = objects.next()?;
            report.extra_vehicles = objects.count();
            if report.extra_vehicles > 0 {
                warn!(
                    ignored = report.extra_vehicles,
                    "snapshot lists several vehicles; using the first"
                );
            }
            first
        }
        _ => return None,
    };
    if object.is_empty() {
        return None;
    }

    let name = string_field(object, &["name"]).unwrap_or_default();
    let id = id_field(object, &["id", "_id"])
        .unwrap_or_else(|| record_id_from(&format!("vehicle:{name}")));
    let purchases = ["fuelPurchases", "fuelEntries"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(|entry| adapt_purchase(entry, report))
                .collect()
        })
        .unwrap_or_default();

    Some(Vehicle {
        id,
        name,
        mileage: amount_field(object, &["mileage"], report),
        fuel_purchases: purchases,
    })
}

fn adapt_purchase(entry: &Map<String, Value>, report: &mut AdaptReport) -> FuelPurchaseEntry {
    let kind = string_field(entry, &["fuelKind", "type", "fuelType"]).unwrap_or_default();
    FuelPurchaseEntry {
        fuel_kind: FuelKind::from(kind),
        litres: amount_field(entry, &["litres", "liters"], report),
        price_per_litre: amount_field(entry, &["pricePerLitre", "price_per_litre", "price"], report),
    }
}

fn adapt_trip(
    idx: usize,
    value: &Value,
    vehicle: Option<&Vehicle>,
    report: &mut AdaptReport,
) -> Option<TripRecord> {
    let Some(object) = value.as_object() else {
        debug!(index = idx, "skipping trip entry that is not an object");
        return None;
    };

    let id = id_field(object, &["id", "_id"])
        .unwrap_or_else(|| record_id_from(&format!("trip:{idx}")));
    let date = date_field(object, &["date", "createdAt"]);
    if date.is_none() {
        report.undated_trips += 1;
        debug!(trip = %id, "trip date missing or unparseable");
    }

    let ancillary_expenses = if object.contains_key("ancillaryExpenses") {
        amount_field(object, &["ancillaryExpenses"], report)
    } else {
        SPLIT_ANCILLARY_KEYS
            .iter()
            .map(|key| amount_field(object, &[*key], report))
            .sum()
    };

    Some(TripRecord {
        id,
        vehicle_id: trip_vehicle(object, vehicle),
        date,
        income: amount_field(object, &["income", "amount", "fare"], report),
        distance: amount_field(object, &["distance"], report),
        ancillary_expenses,
        platform: string_field(object, &["platform", "title"]).filter(|name| !name.is_empty()),
    })
}

/// Resolves the trip's vehicle reference; older documents refer to the
/// vehicle by display name.
fn trip_vehicle(object: &Map<String, Value>, vehicle: Option<&Vehicle>) -> Option<Uuid> {
    let keys = ["vehicleId", "vehicle", "vehicle_id"];
    let raw = keys.iter().find_map(|key| object.get(*key))?;
    if let Some(name) = raw.as_str() {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(vehicle) = vehicle {
            if !vehicle.name.is_empty() && vehicle.name.eq_ignore_ascii_case(name) {
                return Some(vehicle.id);
            }
        }
    }
    raw_id(raw)
}

fn id_field(object: &Map<String, Value>, keys: &[&str]) -> Option<Uuid> {
    keys.iter().find_map(|key| object.get(*key)).and_then(raw_id)
}

fn raw_id(value: &Value) -> Option<Uuid> {
    match value {
        Value::String(raw) if !raw.trim().is_empty() => Some(record_id_from(raw)),
        Value::Number(number) => Some(record_id_from(&number.to_string())),
        Value::Object(object) => object
            .get("$oid")
            .or_else(|| object.get("_id"))
            .or_else(|| object.get("id"))
            .and_then(raw_id),
        _ => None,
    }
}

fn string_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key))
        .and_then(Value::as_str)
        .map(|value| value.trim().to_string())
}

fn amount_field(object: &Map<String, Value>, keys: &[&str], report: &mut AdaptReport) -> f64 {
    let Some(value) = keys.iter().find_map(|key| object.get(*key)) else {
        return 0.0;
    };
    let amount = deserialize_amount(value).unwrap_or(0.0);
    if amount == 0.0 && !is_plain_zero(value) {
        report.coerced_fields += 1;
        debug!(field = keys[0], raw = %value, "coerced malformed amount to zero");
    }
    amount
}

fn is_plain_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(raw) => raw.trim().is_empty() || raw.trim().parse::<f64>() == Ok(0.0),
        _ => false,
    }
}

fn date_field(object: &Map<String, Value>, keys: &[&str]) -> Option<chrono::DateTime<chrono::Utc>> {
    let value = keys.iter().find_map(|key| object.get(*key))?;
    let value = value.get("$date").unwrap_or(value);
    deserialize_trip_date(value).ok().flatten()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
