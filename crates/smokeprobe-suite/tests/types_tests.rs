use std::time::Duration;

use smokeprobe_suite::*;

// ---------------------------------------------------------------------------
// Target
// ---------------------------------------------------------------------------

#[test]
fn default_target_parses() {
    let target = Target::parse(DEFAULT_BASE_URL).unwrap();
    assert_eq!(target.to_string(), "http://localhost:5045/api");
}

#[test]
fn target_rejects_garbage() {
    let err = Target::parse("not a url").unwrap_err();
    assert!(matches!(err, TargetError::InvalidUrl(_)));
    assert!(err.to_string().starts_with("invalid target URL"));
}

#[test]
fn target_rejects_non_http_scheme() {
    match Target::parse("ftp://localhost/api").unwrap_err() {
        TargetError::UnsupportedScheme(scheme) => assert_eq!(scheme, "ftp"),
        other => panic!("expected UnsupportedScheme, got: {other}"),
    }
}

#[test]
fn api_scope_keeps_base_path() {
    let target = Target::parse("http://localhost:5045/api").unwrap();
    let url = target.url_for(&Check::get("users", "/users")).unwrap();
    assert_eq!(url.as_str(), "http://localhost:5045/api/users");
}

#[test]
fn api_scope_tolerates_slashes() {
    let target = Target::parse("http://localhost:5045/api/").unwrap();
    let url = target.url_for(&Check::get("users", "users")).unwrap();
    assert_eq!(url.as_str(), "http://localhost:5045/api/users");
}

#[test]
fn api_scope_on_bare_host() {
    let target = Target::parse("http://example.com").unwrap();
    let url = target.url_for(&Check::get("users", "/users")).unwrap();
    assert_eq!(url.as_str(), "http://example.com/users");
}

#[test]
fn host_scope_drops_base_path() {
    let target = Target::parse("http://localhost:5045/api").unwrap();
    let check = Check::get("swagger", "/swagger/index.html").on_host();
    let url = target.url_for(&check).unwrap();
    assert_eq!(url.as_str(), "http://localhost:5045/swagger/index.html");
}

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

#[test]
fn method_displays_uppercase() {
    assert_eq!(Method::Get.to_string(), "GET");
    assert_eq!(Method::Post.to_string(), "POST");
}

// ---------------------------------------------------------------------------
// CheckResult
// ---------------------------------------------------------------------------

#[test]
fn passed_result_has_no_failure() {
    let result = CheckResult::passed("users", 200, "Users found: 2", Duration::from_millis(12))
        .with_item_count(2);
    assert!(result.ok);
    assert_eq!(result.failure, None);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.item_count, Some(2));
}

#[test]
fn failed_result_carries_kind() {
    let result = CheckResult::failed(
        "users",
        FailureKind::Transport,
        None,
        "connection refused",
        None,
    );
    assert!(!result.ok);
    assert_eq!(result.failure, Some(FailureKind::Transport));
    assert_eq!(result.status_code, None);
    assert_eq!(result.latency, None);
}

#[test]
fn result_serializes_latency_in_millis() {
    let result = CheckResult::passed("users", 200, "", Duration::from_millis(1500));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["checkName"], "users");
    assert_eq!(json["latencyMs"], 1500);
    assert!(json.get("failure").is_none());
}

#[test]
fn failed_result_serializes_kind_in_camel_case() {
    let result = CheckResult::failed(
        "users",
        FailureKind::UnexpectedStatus,
        Some(404),
        "HTTP 404",
        Some(Duration::from_millis(3)),
    );
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["failure"], "unexpectedStatus");
    assert_eq!(json["statusCode"], 404);
    assert_eq!(json["ok"], false);
}

#[test]
fn transport_result_serializes_null_latency() {
    let result = CheckResult::failed("users", FailureKind::Transport, None, "refused", None);
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["latencyMs"].is_null());
    assert!(json["statusCode"].is_null());
    assert!(json.get("itemCount").is_none());
    assert_eq!(json["failure"], "transport");
}
