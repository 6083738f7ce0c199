use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::real_estate_suite;
use crate::types::{Check, Method};

#[derive(Debug, thiserror::Error)]
pub enum SuiteError {
    #[error("failed to read suite file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML suite: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON suite: {0}")]
    Json(#[from] serde_json::Error),
    #[error("suite contains no checks")]
    Empty,
    #[error("check #{index} has an empty name")]
    EmptyName { index: usize },
    #[error("duplicate check name: {0}")]
    DuplicateName(String),
    #[error("check {0} has no expected status codes")]
    NoExpectedStatus(String),
    #[error("check {name} expects invalid HTTP status {code}")]
    InvalidStatus { name: String, code: u16 },
    #[error("check {0} sends a body with GET")]
    BodyOnGet(String),
}

/// An ordered list of checks, as loaded from a suite file.
///
/// ```yaml
/// checks:
///   - name: list-users
///     path: /users
///     expectBody: jsonArray
///     label: Users
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suite {
    pub checks: Vec<Check>,
}

impl Suite {
    /// The real-estate listings suite used when no file is given.
    pub fn builtin() -> Self {
        Self {
            checks: real_estate_suite(),
        }
    }

    /// Load a suite from disk. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON. The result is validated before it is returned.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SuiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Self::from_yaml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// Parse and validate a YAML suite document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, SuiteError> {
        let suite: Suite = serde_yaml::from_str(contents)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Parse and validate a JSON suite document.
    pub fn from_json_str(contents: &str) -> Result<Self, SuiteError> {
        let suite: Suite = serde_json::from_str(contents)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Render the suite in the same YAML shape `from_yaml_str` reads.
    pub fn to_yaml(&self) -> Result<String, SuiteError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject suites that could never produce a meaningful report.
    pub fn validate(&self) -> Result<(), SuiteError> {
        if self.checks.is_empty() {
            return Err(SuiteError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, check) in self.checks.iter().enumerate() {
            if check.name.trim().is_empty() {
                return Err(SuiteError::EmptyName { index });
            }
            if !seen.insert(check.name.as_str()) {
                return Err(SuiteError::DuplicateName(check.name.clone()));
            }
            if check.expected_status.is_empty() {
                return Err(SuiteError::NoExpectedStatus(check.name.clone()));
            }
            if let Some(&code) = check
                .expected_status
                .iter()
                .find(|c| !(100..=599).contains(*c))
            {
                return Err(SuiteError::InvalidStatus {
                    name: check.name.clone(),
                    code,
                });
            }
            if check.method == Method::Get && check.body.is_some() {
                return Err(SuiteError::BodyOnGet(check.name.clone()));
            }
        }
        Ok(())
    }
}
