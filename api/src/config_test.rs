use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_set() {
    let config = ApiConfig::from_lookup(lookup(&[])).expect("config");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeouts, ApiTimeouts::default());
}

#[test]
fn host_and_port_are_joined() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("GREENMATE_API_HOST", "https://api.greenmate.kr"),
        ("GREENMATE_API_PORT", "8443"),
    ]))
    .expect("config");
    assert_eq!(config.base_url, "https://api.greenmate.kr:8443");
}

#[test]
fn host_without_port_is_used_as_is() {
    let config = ApiConfig::from_lookup(lookup(&[("GREENMATE_API_HOST", "http://10.0.0.5/")])).expect("config");
    assert_eq!(config.base_url, "http://10.0.0.5");
}

#[test]
fn explicit_base_url_wins_over_host() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("GREENMATE_API_BASE_URL", "http://127.0.0.1:9000/"),
        ("GREENMATE_API_HOST", "http://ignored"),
    ]))
    .expect("config");
    assert_eq!(config.base_url, "http://127.0.0.1:9000");
}

#[test]
fn timeouts_parse_and_fall_back_on_garbage() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("GREENMATE_REQUEST_TIMEOUT_SECS", "5"),
        ("GREENMATE_CONNECT_TIMEOUT_SECS", "soon"),
    ]))
    .expect("config");
    assert_eq!(config.timeouts.request_secs, 5);
    assert_eq!(config.timeouts.connect_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
}

#[test]
fn rejects_base_url_without_scheme() {
    let err = ApiConfig::new("api.greenmate.kr").expect_err("should fail");
    assert!(matches!(err, ApiError::Config(_)));
}

#[test]
fn zero_timeouts_fall_back_to_defaults() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("GREENMATE_REQUEST_TIMEOUT_SECS", "0"),
        ("GREENMATE_CONNECT_TIMEOUT_SECS", " 0 "),
    ]))
    .expect("config");
    assert_eq!(config.timeouts, ApiTimeouts::default());
}

#[test]
fn rejects_base_url_with_invalid_host() {
    let err = ApiConfig::new("http://bad host.example").expect_err("should fail");
    assert!(matches!(err, ApiError::Config(_)));
}
