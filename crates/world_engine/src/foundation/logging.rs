//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from the `RUST_LOG` environment variable
pub fn init() {
    env_logger::init();
}

/// Initialize logging with an explicit filter (e.g. `"world_engine=debug"`)
///
/// Returns `false` if a logger was already installed.
pub fn init_with_filter(filter: &str) -> bool {
    env_logger::Builder::new()
        .parse_filters(filter)
        .try_init()
        .is_ok()
}

/// Install a test logger; safe to call from every test
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
