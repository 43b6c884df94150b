//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Reads the `RUST_LOG` environment variable for filtering. Safe to call from
/// binaries and test harnesses; repeated initialization is ignored.
pub fn init() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
