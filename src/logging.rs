//! Diagnostic logging to stderr.
//!
//! The ping report itself goes to stdout through the formatter; this only
//! carries `tracing` events. `RUST_LOG` overrides the default level.

use tracing_subscriber::filter::{EnvFilter, LevelFilter};

pub fn init(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();

    // a subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
