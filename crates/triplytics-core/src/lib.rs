//! triplytics-core
//!
//! Net-profit and fuel-cost estimation for ride-hailing trips.
//! Depends on triplytics-domain. No CLI, no terminal I/O, no storage, no logging:
//! every operation is a pure function of the snapshot it is handed.

pub mod error;
pub mod format;
pub mod fuel_ledger;
pub mod period_aggregator;
pub mod summary_service;
pub mod time;
pub mod trip_cost;

pub use error::{parse_period, CoreError};
pub use format::*;
pub use fuel_ledger::*;
pub use period_aggregator::*;
pub use summary_service::*;
pub use time::*;
pub use trip_cost::*;
