use std::time::Duration;

use smokeprobe::config::{BASE_URL_ENV, ProbeConfig, TIMEOUT_ENV};
use smokeprobe::reporter::{OutputFormat, Report};
use smokeprobe_suite::{CheckResult, FailureKind};

// ---------------------------------------------------------------------------
// ProbeConfig
// ---------------------------------------------------------------------------

#[test]
fn defaults_without_env() {
    temp_env::with_vars_unset([BASE_URL_ENV, TIMEOUT_ENV], || {
        let config = ProbeConfig::from_env();
        assert_eq!(config.base_url, "http://localhost:5045/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    });
}

#[test]
fn env_overrides_defaults() {
    temp_env::with_vars(
        [
            (BASE_URL_ENV, Some("http://staging:8080/api")),
            (TIMEOUT_ENV, Some("12")),
        ],
        || {
            let config = ProbeConfig::from_env();
            assert_eq!(config.base_url, "http://staging:8080/api");
            assert_eq!(config.timeout, Duration::from_secs(12));
        },
    );
}

#[test]
fn invalid_timeout_env_falls_back() {
    temp_env::with_vars([(BASE_URL_ENV, None), (TIMEOUT_ENV, Some("soon"))], || {
        assert_eq!(ProbeConfig::from_env().timeout, Duration::from_secs(5));
    });
    temp_env::with_vars([(BASE_URL_ENV, None), (TIMEOUT_ENV, Some("0"))], || {
        assert_eq!(ProbeConfig::from_env().timeout, Duration::from_secs(5));
    });
}

#[test]
fn blank_base_url_env_falls_back() {
    temp_env::with_vars([(BASE_URL_ENV, Some("  ")), (TIMEOUT_ENV, None)], || {
        assert_eq!(ProbeConfig::from_env().base_url, "http://localhost:5045/api");
    });
}

#[test]
fn flags_override_env() {
    temp_env::with_vars(
        [
            (BASE_URL_ENV, Some("http://staging:8080/api")),
            (TIMEOUT_ENV, Some("12")),
        ],
        || {
            let config = ProbeConfig::from_env()
                .with_overrides(Some("http://prod:80/api".to_string()), Some(3));
            assert_eq!(config.base_url, "http://prod:80/api");
            assert_eq!(config.timeout, Duration::from_secs(3));
        },
    );
}

#[test]
fn zero_timeout_flag_is_ignored() {
    let config = ProbeConfig::default().with_overrides(None, Some(0));
    assert_eq!(config.timeout, Duration::from_secs(5));
}

#[test]
fn target_from_config() {
    let config = ProbeConfig::default();
    assert_eq!(
        config.target().unwrap().base_url().as_str(),
        "http://localhost:5045/api"
    );

    let bad = ProbeConfig::default().with_overrides(Some("localhost:5045".to_string()), None);
    assert!(bad.target().is_err());
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

fn pass(name: &str) -> CheckResult {
    CheckResult::passed(name, 200, "HTTP 200", Duration::from_millis(4))
}

fn fail(name: &str) -> CheckResult {
    CheckResult::failed(name, FailureKind::Transport, None, "transport error", None)
}

#[test]
fn all_passing_exits_zero() {
    let report = Report::from_results(vec![pass("a"), pass("b")]);
    assert!(report.passed);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 0);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.tally_line(), "PASS: 2 checks, 2 passed, 0 failed");
}

#[test]
fn failures_set_exit_code_to_count() {
    let report = Report::from_results(vec![pass("a"), fail("b"), fail("c")]);
    assert!(!report.passed);
    assert_eq!(report.exit_code(), 2);
    assert_eq!(report.tally_line(), "FAIL: 3 checks, 1 passed, 2 failed");
}

#[test]
fn exit_code_caps_at_255() {
    let results = (0..300).map(|i| fail(&format!("c{i}"))).collect();
    let report = Report::from_results(results);
    assert_eq!(report.failed, 300);
    assert_eq!(report.exit_code(), 255);
}

#[test]
fn text_render_ends_with_tally() {
    let report = Report::from_results(vec![pass("a"), fail("b")]);
    let mut out = Vec::new();
    report.render(OutputFormat::Text, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "\nFAIL: 2 checks, 1 passed, 1 failed\n");
}

#[test]
fn json_render_keeps_result_order() {
    let report = Report::from_results(vec![fail("first"), pass("second")]);
    let mut out = Vec::new();
    report.render(OutputFormat::Json, &mut out).unwrap();

    let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(doc["passed"], false);
    assert_eq!(doc["total"], 2);
    assert_eq!(doc["failed"], 1);
    assert_eq!(doc["results"][0]["checkName"], "first");
    assert_eq!(doc["results"][0]["failure"], "transport");
    assert_eq!(doc["results"][1]["checkName"], "second");
    assert_eq!(doc["results"][1]["latencyMs"], 4);
}
