use std::time::Duration;

use smokeprobe_suite::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, Target, TargetError};
use tracing::{debug, warn};

pub const BASE_URL_ENV: &str = "SMOKEPROBE_BASE_URL";
pub const TIMEOUT_ENV: &str = "SMOKEPROBE_TIMEOUT_SECS";

/// Where to probe and how long to wait for each request.
///
/// Resolution order: command-line flag, then environment variable, then the
/// built-in default.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbeConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProbeConfig {
    /// Defaults overlaid with `SMOKEPROBE_BASE_URL` and `SMOKEPROBE_TIMEOUT_SECS`.
    /// Unusable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => {
                debug!(base_url = %url, "using {BASE_URL_ENV} from env");
                config.base_url = url.trim().to_string();
            }
            Ok(_) => warn!("{BASE_URL_ENV} is empty, using default {DEFAULT_BASE_URL}"),
            Err(_) => {}
        }

        if let Ok(s) = std::env::var(TIMEOUT_ENV) {
            match s.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    debug!(timeout_secs = secs, "using {TIMEOUT_ENV} from env");
                    config.timeout = Duration::from_secs(secs);
                }
                Ok(_) => {
                    warn!("{TIMEOUT_ENV} must be positive, using default {DEFAULT_TIMEOUT_SECS}")
                }
                Err(e) => {
                    warn!(value = %s, error = %e, "invalid {TIMEOUT_ENV}, using default {DEFAULT_TIMEOUT_SECS}")
                }
            }
        }

        config
    }

    /// Apply command-line flags on top of the environment-derived values.
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        match timeout_secs {
            Some(0) => warn!("--timeout-secs must be positive, keeping {:?}", self.timeout),
            Some(secs) => self.timeout = Duration::from_secs(secs),
            None => {}
        }
        self
    }

    pub fn target(&self) -> Result<Target, TargetError> {
        Target::parse(&self.base_url)
    }
}
