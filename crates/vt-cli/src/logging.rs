//! Log output for the `vt` binary

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects debug output for
/// the workspace crates.
pub(crate) fn init(verbose: bool) {
    let default_directives = if verbose {
        "info,vt_core=debug,vt_server=debug,vt=debug,tower_http=debug"
    } else {
        "info,tower_http=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Also bridges `log` records through tracing-log.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
