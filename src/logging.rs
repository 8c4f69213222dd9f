//! Tracing initialization.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// results and JSON output.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects debug output for
/// this crate, and only errors are shown otherwise.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "warn,docs_explorer=debug"
        } else {
            "error"
        })
    });

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .try_init();

    if let Err(e) = result {
        eprintln!("Failed to initialize tracing: {e}");
    }
}
