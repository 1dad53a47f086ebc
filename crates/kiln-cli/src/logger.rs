//! Logging setup for the Kiln CLI.
//!
//! Level selection, first match wins:
//! 1. `--verbose`: debug for kiln crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`
//! 4. info for kiln crates
//!
//! Logs go to stderr so `kiln plan` output on stdout stays valid JSON.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "kiln_config=debug,kiln_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "kiln_config=info,kiln_cli=info";

pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_colors())
        .compact();

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn verbose_filter_enables_debug() {
        assert_eq!(filter_for(true, false).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn quiet_filter_is_errors_only() {
        assert_eq!(filter_for(false, true).max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logger(false, true, true);
        init_logger(true, false, true);
    }
}
