use smokeprobe_suite::{BodyExpectation, Check, CheckResult};
use tracing::debug;

use crate::client::{HttpClient, HttpResponse, ProbeError};

/// Executes one check and reports its outcome.
///
/// Implementations never fail: every error is folded into the returned
/// [`CheckResult`], so a runner can keep going after any single check.
pub trait Probe: Send + Sync {
    fn probe(&self, check: &Check) -> impl std::future::Future<Output = CheckResult> + Send;
}

impl Probe for HttpClient {
    async fn probe(&self, check: &Check) -> CheckResult {
        let outcome = self.send(check).await;
        classify(check, outcome)
    }
}

/// Turn the raw outcome of a request into a [`CheckResult`].
///
/// Transport errors carry no status or latency. A status outside the check's
/// expected set fails without looking at the body. Only once the status is
/// accepted is the body held to the check's [`BodyExpectation`].
pub fn classify(check: &Check, outcome: Result<HttpResponse, ProbeError>) -> CheckResult {
    let resp = match outcome {
        Ok(resp) => resp,
        Err(e) => {
            debug!(check = %check.name, error = %e, "request failed");
            return CheckResult::failed(&check.name, e.failure_kind(), None, &e.to_string(), None);
        }
    };

    let status = resp.status;
    if !check.expects_status(status) {
        let e = ProbeError::unexpected_status(status, &resp.body);
        return CheckResult::failed(
            &check.name,
            e.failure_kind(),
            Some(status),
            &e.to_string(),
            Some(resp.latency),
        );
    }

    match check.expect_body {
        BodyExpectation::Any => {
            CheckResult::passed(&check.name, status, &format!("HTTP {status}"), resp.latency)
        }
        BodyExpectation::Json => match parse_json(&resp.body) {
            Ok(_) => CheckResult::passed(
                &check.name,
                status,
                &format!("HTTP {status}, valid JSON"),
                resp.latency,
            ),
            Err(e) => parse_failure(check, &resp, format!("body is not valid JSON: {e}")),
        },
        BodyExpectation::JsonArray => match parse_json(&resp.body) {
            Ok(serde_json::Value::Array(items)) => {
                let noun = check.label.as_deref().unwrap_or("Items");
                CheckResult::passed(
                    &check.name,
                    status,
                    &format!("{noun} found: {}", items.len()),
                    resp.latency,
                )
                .with_item_count(items.len())
            }
            Ok(other) => parse_failure(
                check,
                &resp,
                format!("expected a JSON array, got {}", json_kind(&other)),
            ),
            Err(e) => parse_failure(check, &resp, format!("body is not valid JSON: {e}")),
        },
    }
}

/// Parse a response body as JSON, ignoring a leading UTF-8 byte order mark.
fn parse_json(body: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(body.strip_prefix('\u{feff}').unwrap_or(body))
}

fn parse_failure(check: &Check, resp: &HttpResponse, reason: String) -> CheckResult {
    let e = ProbeError::Parse(reason);
    CheckResult::failed(
        &check.name,
        e.failure_kind(),
        Some(resp.status),
        &e.to_string(),
        Some(resp.latency),
    )
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
