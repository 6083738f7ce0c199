use std::io::Write;

use serde::Serialize;
use smokeprobe_suite::CheckResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Progress lines and a tally on stdout.
    #[default]
    Text,
    /// Progress lines on stderr, a JSON report on stdout.
    Json,
}

/// Tally of a finished run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub passed: bool,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<CheckResult>,
}

impl Report {
    pub fn from_results(results: Vec<CheckResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.ok).count();
        let failed = results.len() - succeeded;
        Self {
            passed: failed == 0,
            total: results.len(),
            succeeded,
            failed,
            results,
        }
    }

    /// 0 when every check passed, otherwise the number of failures capped
    /// at 255.
    pub fn exit_code(&self) -> u8 {
        self.failed.min(u8::MAX as usize) as u8
    }

    pub fn tally_line(&self) -> String {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        format!(
            "{verdict}: {} checks, {} passed, {} failed",
            self.total, self.succeeded, self.failed
        )
    }

    pub fn render<W: Write>(&self, format: OutputFormat, out: &mut W) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => {
                writeln!(out)?;
                writeln!(out, "{}", self.tally_line())
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
        }
    }
}
