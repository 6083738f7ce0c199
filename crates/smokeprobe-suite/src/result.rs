use std::time::Duration;

use serde::Serialize;

/// Why a check did not pass.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// DNS failure, refused connection, timeout, or any other error before a
    /// status line was received.
    Transport,
    /// The service answered with a status code the check does not accept.
    UnexpectedStatus,
    /// The status matched but the body did not have the expected shape.
    Parse,
}

/// Recorded outcome of executing one [`Check`](crate::Check).
///
/// `ok` is true exactly when `failure` is `None`; the constructors keep the
/// two in step.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub check_name: String,
    pub ok: bool,
    pub status_code: Option<u16>,
    pub detail: String,
    #[serde(rename = "latencyMs", serialize_with = "serialize_latency_millis")]
    pub latency: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
}

impl CheckResult {
    /// A passing result for a response with an accepted status.
    pub fn passed(check_name: &str, status_code: u16, detail: &str, latency: Duration) -> Self {
        Self {
            check_name: check_name.to_string(),
            ok: true,
            status_code: Some(status_code),
            detail: detail.to_string(),
            latency: Some(latency),
            failure: None,
            item_count: None,
        }
    }

    /// A failing result; `status_code` and `latency` are `None` when no
    /// response arrived.
    pub fn failed(
        check_name: &str,
        failure: FailureKind,
        status_code: Option<u16>,
        detail: &str,
        latency: Option<Duration>,
    ) -> Self {
        Self {
            check_name: check_name.to_string(),
            ok: false,
            status_code,
            detail: detail.to_string(),
            latency,
            failure: Some(failure),
            item_count: None,
        }
    }

    /// Attach the length of a JSON array body.
    pub fn with_item_count(mut self, count: usize) -> Self {
        self.item_count = Some(count);
        self
    }
}

fn serialize_latency_millis<S: serde::Serializer>(
    value: &Option<Duration>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => s.serialize_some(&(d.as_millis() as u64)),
        None => s.serialize_none(),
    }
}
