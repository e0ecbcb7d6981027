#![doc(test(attr(deny(warnings))))]

//! Triplytics estimates what a ride-hailing driver actually keeps: trip income
//! minus fuel burnt (priced from the vehicle's fuel purchases) minus tolls,
//! parking and other ancillary costs, over daily to annual windows.
//!
//! The computation lives in [`triplytics_core`]; this crate wires it to
//! configuration, JSON snapshots and the command line.

pub mod cli;
pub mod errors;
pub mod utils;

pub use triplytics_core as core;
pub use triplytics_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the log subscriber exactly once. Safe to call repeatedly.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!(version = utils::build_info::CLI_VERSION, "logging ready");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
        assert!(super::INIT_TRACING.is_completed());
    }
}
