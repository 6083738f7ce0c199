use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported target URL scheme: {0}")]
    UnsupportedScheme(String),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of the target URL a check's path is resolved against.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    /// Appended to the full base URL (`http://host:5045/api` + `/users`).
    #[default]
    Api,
    /// Resolved against the scheme, host and port only
    /// (`http://host:5045` + `/swagger/index.html`).
    Host,
}

/// What a check requires of the response body once the status matched.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BodyExpectation {
    /// Body is not inspected.
    #[default]
    Any,
    /// Body must parse as JSON.
    Json,
    /// Body must parse as a JSON array; its length is reported.
    JsonArray,
}

/// A single named HTTP probe and the outcome it expects.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Check {
    pub name: String,
    #[serde(default)]
    pub method: Method,
    pub path: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(default = "default_expected_status")]
    pub expected_status: BTreeSet<u16>,
    #[serde(default)]
    pub expect_body: BodyExpectation,
    /// Noun used when reporting the length of a JSON array body,
    /// e.g. `"Properties"` renders as `Properties found: 3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

fn default_expected_status() -> BTreeSet<u16> {
    BTreeSet::from([200])
}

impl Check {
    /// A GET check expecting 200 with the body left uninspected.
    pub fn get(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            method: Method::Get,
            path: path.to_string(),
            scope: Scope::Api,
            body: None,
            expected_status: default_expected_status(),
            expect_body: BodyExpectation::Any,
            label: None,
        }
    }

    /// A POST check sending `body` as JSON; otherwise the same defaults as [`Check::get`].
    pub fn post(name: &str, path: &str, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            body: Some(body),
            ..Self::get(name, path)
        }
    }

    /// Replace the accepted status codes.
    pub fn with_expected_status(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.expected_status = codes.into_iter().collect();
        self
    }

    /// Require the body to have the given shape once the status matched.
    pub fn expecting(mut self, expect_body: BodyExpectation) -> Self {
        self.expect_body = expect_body;
        self
    }

    /// Set the noun used in `"<label> found: N"`.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Resolve the path against the target's host instead of its base URL.
    pub fn on_host(mut self) -> Self {
        self.scope = Scope::Host;
        self
    }

    /// Whether `status` is one of the accepted codes.
    pub fn expects_status(&self, status: u16) -> bool {
        self.expected_status.contains(&status)
    }
}

/// Base address of the service under test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    base_url: Url,
}

impl Target {
    /// Parse and validate a base URL. Only `http` and `https` are accepted.
    pub fn parse(base_url: &str) -> Result<Self, TargetError> {
        let base_url = Url::parse(base_url.trim())?;
        match base_url.scheme() {
            "http" | "https" => Ok(Self { base_url }),
            other => Err(TargetError::UnsupportedScheme(other.to_string())),
        }
    }

    /// The parsed base URL, as given.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the URL a check should be sent to.
    ///
    /// `Scope::Api` paths are appended to the base URL verbatim, so a base of
    /// `http://localhost:5045/api` keeps its `/api` prefix. `Scope::Host`
    /// paths replace the base URL's path entirely.
    pub fn url_for(&self, check: &Check) -> Result<Url, url::ParseError> {
        let path = if check.path.starts_with('/') {
            check.path.clone()
        } else {
            format!("/{}", check.path)
        };
        match check.scope {
            Scope::Api => {
                let mut base = self.base_url.clone();
                base.set_query(None);
                base.set_fragment(None);
                Url::parse(&format!("{}{}", base.as_str().trim_end_matches('/'), path))
            }
            Scope::Host => self.base_url.join(&path),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url.as_str())
    }
}
