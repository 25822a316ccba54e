//! Tracing subscriber setup.
//!
//! Log records go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration for the CLI.
///
/// `RUST_LOG` takes precedence over the level set with [`Telemetry::with_log_level`].
#[derive(Debug, Default)]
pub struct Telemetry {
    log_level: Option<String>,
}

impl Telemetry {
    /// Creates a new, empty [`Telemetry`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level filter used when `RUST_LOG` is not set.
    ///
    /// Accepts any valid [`EnvFilter`] directive string (e.g. `"debug"`,
    /// `"deploy_networks=trace"`).
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Installs the global subscriber. Later calls are ignored.
    pub fn register(self) {
        let fallback = self.log_level.as_deref().unwrap_or("warn");
        let result = tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
        if result.is_ok() {
            tracing::debug!(fallback, "tracing subscriber registered");
        }
    }
}
