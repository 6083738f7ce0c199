use std::io::Write;

use smokeprobe_http::Probe;
use smokeprobe_suite::{Check, CheckResult};
use tracing::{info, warn};

/// Runs checks one after another and streams a line per outcome.
///
/// Each check is awaited before the next starts, so progress lines and the
/// returned results are both in definition order.
pub struct ProbeRunner<P> {
    probe: P,
}

impl<P: Probe> ProbeRunner<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    pub async fn run<W: Write>(&self, checks: &[Check], out: &mut W) -> Vec<CheckResult> {
        let total = checks.len();
        let mut results = Vec::with_capacity(total);

        for (i, check) in checks.iter().enumerate() {
            let result = self.probe.probe(check).await;
            info!(
                check = %check.name,
                ok = result.ok,
                status = ?result.status_code,
                latency_ms = result.latency.map(|d| d.as_millis() as u64),
                "check finished"
            );

            // A broken progress stream must not stop the run; the report
            // still carries every result.
            if let Err(e) = writeln!(out, "{}", progress_line(i + 1, total, check, &result)) {
                warn!(error = %e, "failed to write progress line");
            }
            results.push(result);
        }

        results
    }
}

/// `[2/5] FAIL list-users  GET /users -> 404 (3 ms)  unexpected status 404: not found`
pub fn progress_line(index: usize, total: usize, check: &Check, result: &CheckResult) -> String {
    let verdict = if result.ok { "PASS" } else { "FAIL" };
    let status = match result.status_code {
        Some(code) => code.to_string(),
        None => "no response".to_string(),
    };
    let latency = match result.latency {
        Some(d) => format!(" ({} ms)", d.as_millis()),
        None => String::new(),
    };
    format!(
        "[{index}/{total}] {verdict} {}  {} {} -> {status}{latency}  {}",
        check.name, check.method, check.path, result.detail
    )
}
