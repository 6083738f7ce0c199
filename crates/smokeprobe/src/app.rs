use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use smokeprobe_http::HttpClient;
use smokeprobe_suite::Suite;
use tracing::info;

use crate::config::ProbeConfig;
use crate::reporter::{OutputFormat, Report};
use crate::runner::ProbeRunner;

/// Command-line choices for one smoke-test run. `None` fields fall back to
/// the environment, then to the built-in defaults.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub suite: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Run a suite and return the process exit code.
///
/// Progress lines go to `progress` as each check finishes; the final report
/// goes to `out`. The target and suite are resolved before anything is
/// written or sent, so a bad URL or suite file fails without touching the
/// network.
pub async fn run<O: Write, P: Write>(
    options: RunOptions,
    out: &mut O,
    progress: &mut P,
) -> Result<u8> {
    let config = ProbeConfig::from_env().with_overrides(options.base_url, options.timeout_secs);
    let target = config
        .target()
        .with_context(|| format!("invalid base URL {:?}", config.base_url))?;
    let suite = match &options.suite {
        Some(path) => Suite::from_path(path)
            .with_context(|| format!("failed to load suite {}", path.display()))?,
        None => Suite::builtin(),
    };

    info!(%target, checks = suite.checks.len(), timeout = ?config.timeout, "starting smoke test");

    writeln!(
        progress,
        "Probing {target} ({} checks, {}s timeout)",
        suite.checks.len(),
        config.timeout.as_secs()
    )?;

    let runner = ProbeRunner::new(HttpClient::new(target, config.timeout)?);
    let results = runner.run(&suite.checks, progress).await;

    let report = Report::from_results(results);
    report.render(options.format, out)?;

    info!(
        passed = report.succeeded,
        failed = report.failed,
        "smoke test finished"
    );
    Ok(report.exit_code())
}

/// Write the built-in suite as YAML, ready to be edited and passed back
/// with `--suite`.
pub fn print_suite<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{}", Suite::builtin().to_yaml()?)?;
    Ok(())
}
