pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_DIRECTIVES: &str = "triplytics=warn,triplytics_storage_json=warn";

/// Installs a `fmt` subscriber on stderr so stdout carries only report output.
///
/// Callers go through [`crate::init`], which guards this with a `Once`.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    // An embedding host may already own the global subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
