use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smokeprobe::app::{self, RunOptions};
use smokeprobe::reporter::OutputFormat;
use smokeprobe::telemetry;

#[derive(Parser)]
#[command(
    name = "smokeprobe",
    about = "Smoke-test a running HTTP API and report pass/fail per check"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the API under test (env: SMOKEPROBE_BASE_URL,
    /// default: http://localhost:5045/api).
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout in seconds (env: SMOKEPROBE_TIMEOUT_SECS, default: 5).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// YAML or JSON file of checks to run instead of the built-in suite.
    #[arg(long)]
    suite: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log each check and request to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the built-in check suite as YAML to stdout.
    Suite,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    if let Some(Commands::Suite) = cli.command {
        app::print_suite(&mut std::io::stdout())?;
        return Ok(ExitCode::SUCCESS);
    }

    let options = RunOptions {
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
        suite: cli.suite,
        format: cli.format,
    };

    // JSON mode keeps stdout parseable by moving progress lines to stderr.
    let mut progress: Box<dyn Write> = match options.format {
        OutputFormat::Text => Box::new(std::io::stdout()),
        OutputFormat::Json => Box::new(std::io::stderr()),
    };
    let code = app::run(options, &mut std::io::stdout(), &mut progress).await?;
    Ok(ExitCode::from(code))
}
