//! Log setup shared by the command-line tools.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global subscriber writing compact lines to stderr.
///
/// Priority: `RUST_LOG` env var > `verbose` flag (debug) > info.
pub fn init(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
