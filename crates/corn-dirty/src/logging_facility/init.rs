//! Logging initialization
//!
//! Installs the global tracing subscriber exactly once per process.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

use super::test_capture::init_test_capture;

/// Default filter directive for development output
const DEV_FILTER: &str = "corn_dirty=debug";

/// Default filter directive for production output
const PROD_FILTER: &str = "corn_dirty=info";

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, debug level
    Development,
    /// JSON structured output, info level
    Production,
    /// In-memory capture layer; `init_test_capture()` returns the same handle
    Test,
}

impl Profile {
    fn default_filter(&self) -> EnvFilter {
        let directive = match self {
            Profile::Production => PROD_FILTER,
            Profile::Development | Profile::Test => DEV_FILTER,
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Only the first call has any effect; later calls are no-ops whatever
/// profile they pass. `RUST_LOG` overrides the profile's default filter.
/// If another global subscriber is already installed, it is left in place.
///
/// # Example
///
/// ```
/// use corn_dirty::logging_facility::{init, Profile};
///
/// init(Profile::Production);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(profile.default_filter())
                .try_init()
                .ok();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(profile.default_filter())
                .try_init()
                .ok();
        }
        Profile::Test => {
            init_test_capture();
        }
    });
}
