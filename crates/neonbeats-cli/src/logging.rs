//! Diagnostic logging setup.
//!
//! User-facing output goes to stdout through `colored`; diagnostics go to
//! stderr through `tracing`. `RUST_LOG` takes precedence over `--verbose`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used without `--verbose`.
pub const DEFAULT_FILTER: &str = "warn";
/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "warn,neonbeats=debug,neonbeats_cli=debug,neonbeats_audio=debug";

/// Picks the filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Installs the global subscriber. Safe to call more than once; later calls are
/// ignored.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
