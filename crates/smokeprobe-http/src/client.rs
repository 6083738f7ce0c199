use std::time::{Duration, Instant};

use smokeprobe_suite::{Check, FailureKind, Method, Target};
use tracing::debug;

/// Longest slice of an error body carried into a report line.
const MAX_BODY_SNIPPET: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("transport error: {}", describe_transport(.0))]
    Transport(#[from] reqwest::Error),
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("parse error: {0}")]
    Parse(String),
}

impl ProbeError {
    /// Build an `UnexpectedStatus` error, trimming the body to a short snippet.
    pub fn unexpected_status(status: u16, body: &str) -> Self {
        ProbeError::UnexpectedStatus {
            status,
            body: snippet(body),
        }
    }

    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ProbeError::Transport(_) | ProbeError::InvalidUrl(_) => FailureKind::Transport,
            ProbeError::UnexpectedStatus { .. } => FailureKind::UnexpectedStatus,
            ProbeError::Parse(_) => FailureKind::Parse,
        }
    }
}

/// Status and body of a completed exchange, whatever the status code.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub latency: Duration,
}

/// HTTP client bound to one [`Target`].
///
/// Every request carries the same hard timeout, covering connect, send and
/// reading the body. Non-2xx statuses are returned as responses, not errors;
/// deciding whether a status is acceptable is the caller's business.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    target: Target,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(target: Target, timeout: Duration) -> Result<Self, ProbeError> {
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner,
            target,
            timeout,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send the request described by `check` and read the full body.
    ///
    /// A JSON body, when present, is sent with `Content-Type: application/json`.
    pub async fn send(&self, check: &Check) -> Result<HttpResponse, ProbeError> {
        let url = self.target.url_for(check)?;
        debug!(check = %check.name, method = %check.method, %url, "sending request");

        let start = Instant::now();
        let mut req = match check.method {
            Method::Get => self.inner.get(url),
            Method::Post => self.inner.post(url),
        };
        if let Some(body) = &check.body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(HttpResponse {
            status,
            body,
            latency: start.elapsed(),
        })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("target", &self.target.base_url().as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Flatten a reqwest error and its sources into one line, led by what went
/// wrong (timeout vs. connect vs. anything else).
fn describe_transport(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    let mut detail = format!("{kind}: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

fn snippet(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "(empty body)".to_string();
    }
    if body.chars().count() <= MAX_BODY_SNIPPET {
        return body.to_string();
    }
    let mut cut: String = body.chars().take(MAX_BODY_SNIPPET).collect();
    cut.push_str("...");
    cut
}
