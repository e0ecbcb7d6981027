//! triplytics-domain
//!
//! Pure domain models (Vehicle, FuelPurchaseEntry, TripRecord, PeriodSelector, etc.).
//! No I/O, no CLI, no storage. Only data types, enums and boundary coercion.

pub mod common;
pub mod period;
pub mod snapshot;
pub mod trip;
pub mod vehicle;

pub use common::*;
pub use period::*;
pub use snapshot::*;
pub use trip::*;
pub use vehicle::*;
