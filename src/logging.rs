//! Tracing setup for the command-line front end

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber, once per process
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or
/// everything from this crate at `info`/`debug` when `verbosity` is 1/2+.
/// Output goes to stderr so exports written to stdout stay clean.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let directive = match verbosity {
            0 => "timesheet=warn",
            1 => "timesheet=info",
            _ => "timesheet=debug",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
