//! Config reader tests

use std::collections::HashMap;
use std::sync::Arc;

use trellis_domain::Error;
use trellis_infrastructure::config::{ConfigReader, MemoryConfigSource};
use trellis_infrastructure::config_keys;

config_keys! {
    pub struct UrlKeys {
        ENDPOINT,
        RETRIES,
    }
}

#[test]
fn test_read_present_key() {
    let source: MemoryConfigSource = [("url.endpoint", "https://api.example.com")]
        .into_iter()
        .collect();
    let reader = ConfigReader::new(Arc::new(source));

    assert_eq!(reader.read(&UrlKeys::ENDPOINT).unwrap(), "https://api.example.com");
    assert!(reader.contains(&UrlKeys::ENDPOINT));
}

#[test]
fn test_missing_key_names_the_key() {
    let reader = ConfigReader::new(Arc::new(MemoryConfigSource::new()));

    match reader.read(&UrlKeys::ENDPOINT) {
        Err(Error::ConfigKeyNotFound { key }) => assert_eq!(key, "url.endpoint"),
        other => panic!("expected missing key, got {other:?}"),
    }
    assert_eq!(reader.read_or(&UrlKeys::ENDPOINT, "fallback"), "fallback");
}

#[test]
fn test_read_as_parses_values() {
    let mut values = HashMap::new();
    values.insert("url.retries".to_string(), "3".to_string());
    let reader = ConfigReader::new(Arc::new(values));

    assert_eq!(reader.read_as::<u32>(&UrlKeys::RETRIES).unwrap(), 3);
}

#[test]
fn test_read_as_rejects_bad_values() {
    let source = MemoryConfigSource::new().with("url.retries", "many");
    let reader = ConfigReader::new(Arc::new(source));

    assert!(matches!(
        reader.read_as::<u32>(&UrlKeys::RETRIES),
        Err(Error::Configuration { .. })
    ));
}

#[test]
fn test_reads_are_not_cached() {
    let source = Arc::new(MemoryConfigSource::new());
    let reader = ConfigReader::new(source.clone());
    assert!(reader.read(&UrlKeys::ENDPOINT).is_err());

    source.set("url.endpoint", "https://late.example.com");
    assert_eq!(reader.read(&UrlKeys::ENDPOINT).unwrap(), "https://late.example.com");
}
