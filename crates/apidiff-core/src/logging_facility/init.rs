//! Logging initialization module

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Warnings and errors only, human-readable
    Quiet,
    /// Per-package progress at debug level, human-readable
    Verbose,
    /// JSON structured output at info level
    Json,
    /// Test capture mode for deterministic testing
    Test,
}

impl Profile {
    /// Pick a profile from the CLI's verbosity switches
    pub fn from_flags(verbose: bool, json: bool) -> Self {
        match (verbose, json) {
            (_, true) => Profile::Json,
            (true, false) => Profile::Verbose,
            (false, false) => Profile::Quiet,
        }
    }

    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Quiet => "apidiff=warn",
            Profile::Verbose => "apidiff=debug",
            Profile::Json => "apidiff=info",
            Profile::Test => "apidiff=trace",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at startup; later calls are ignored. `RUST_LOG` overrides the
/// profile's default filter.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        match profile {
            Profile::Quiet | Profile::Verbose => {
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter)
                    .init();
            }
            Profile::Test => {
                // Test capture is installed separately via init_test_capture()
                tracing_subscriber::registry().init();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_flags() {
        assert_eq!(Profile::from_flags(false, false), Profile::Quiet);
        assert_eq!(Profile::from_flags(true, false), Profile::Verbose);
        assert_eq!(Profile::from_flags(true, true), Profile::Json);
        assert_eq!(Profile::from_flags(false, true), Profile::Json);
    }

    #[test]
    fn test_default_directives_target_apidiff() {
        for profile in [Profile::Quiet, Profile::Verbose, Profile::Json, Profile::Test] {
            assert!(profile.default_directive().starts_with("apidiff="));
        }
    }
}
