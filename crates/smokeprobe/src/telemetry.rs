use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Logs go to stderr as JSON so stdout stays
/// reserved for the report.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "smokeprobe=info,smokeprobe_http=debug"
    } else {
        "smokeprobe=warn,smokeprobe_http=warn"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
