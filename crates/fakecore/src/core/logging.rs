//! Logging initialization for test binaries
//!
//! The harness logs through the `log` facade. Tests that want to see resolution
//! fallbacks and recorded calls call `init_test_logger()` once; the filter comes
//! from `FAKEBOT_LOG` (env_logger syntax, default `warn`).

use crate::core::config;

/// Initialize a test-friendly logger (output is captured by the test harness)
///
/// Safe to call from every test: only the first call installs the logger.
///
/// # Returns
/// * `true` - This call installed the logger
/// * `false` - A logger was already installed and is kept
pub fn init_test_logger() -> bool {
    init_with_filter(&config::LOG_FILTER)
}

/// Initialize the logger with an explicit filter such as `"fakecore=trace"`
pub fn init_with_filter(filter: &str) -> bool {
    let installed = pretty_env_logger::formatted_builder()
        .parse_filters(filter)
        .is_test(true)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("test logger installed with filter {:?}", filter);
    }
    installed
}
