//! Config key holder tests

use trellis_infrastructure::config::{derive_key, section_name};
use trellis_infrastructure::config_keys;

config_keys! {
    pub struct UrlKeys {
        ENDPOINT,
        TIMEOUT = "http.timeout",
    }
}

config_keys! {
    pub struct DatabasePoolKeys {
        MAX_SIZE,
        MIN_IDLE,
    }
}

#[test]
fn test_derived_key_uses_holder_and_attribute() {
    assert_eq!(UrlKeys::ENDPOINT.key(), "url.endpoint");
    assert_eq!(UrlKeys::ENDPOINT.to_string(), "url.endpoint");
}

#[test]
fn test_explicit_key_overrides_derivation() {
    assert_eq!(UrlKeys::TIMEOUT.key(), "http.timeout");
}

#[test]
fn test_camel_case_holder_becomes_snake_case_section() {
    assert_eq!(DatabasePoolKeys::MAX_SIZE.key(), "database_pool.max_size");
    assert_eq!(DatabasePoolKeys::MIN_IDLE.key(), "database_pool.min_idle");
    assert_eq!(DatabasePoolKeys::KEYS.len(), 2);
}

#[test]
fn test_free_functions_match_macro() {
    assert_eq!(section_name("UrlKeys"), "url");
    assert_eq!(derive_key("UrlKeys", "ENDPOINT"), UrlKeys::ENDPOINT.key());
}
