use pa_domain::config::{Config, ConfigSeverity};

#[test]
fn default_base_url_is_local_dev() {
    let config = Config::default();
    assert_eq!(config.identity.base_url, "http://localhost:8001");
}

#[test]
fn default_timeout_is_8s() {
    let config = Config::default();
    assert_eq!(config.identity.timeout_ms, 8000);
}

#[test]
fn default_token_path_is_unset() {
    let config = Config::default();
    assert!(config.storage.token_path.is_none());
}

#[test]
fn identity_section_parses() {
    let toml_str = r#"
[identity]
base_url = "https://portal.example.com"
timeout_ms = 3000
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.identity.base_url, "https://portal.example.com");
    assert_eq!(config.identity.timeout_ms, 3000);
}

#[test]
fn storage_section_parses() {
    let toml_str = r#"
[storage]
token_path = "/tmp/portalauth-test/token"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(
        config.storage.token_path.as_deref(),
        Some(std::path::Path::new("/tmp/portalauth-test/token")),
    );
}

#[test]
fn partial_identity_section_keeps_defaults() {
    let toml_str = r#"
[identity]
base_url = "http://localhost:9000"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.identity.base_url, "http://localhost:9000");
    assert_eq!(config.identity.timeout_ms, 8000);
}

#[test]
fn env_override_wins_over_file_value() {
    let toml_str = r#"
[identity]
base_url = "http://localhost:9000"
"#;
    let mut config: Config = toml::from_str(toml_str).unwrap();
    std::env::set_var(pa_domain::config::BACKEND_URL_ENV, "http://localhost:9001");
    config.apply_env_overrides();
    std::env::remove_var(pa_domain::config::BACKEND_URL_ENV);
    assert_eq!(config.identity.base_url, "http://localhost:9001");
}

#[test]
fn default_config_validates_clean() {
    let issues = Config::default().validate();
    assert!(issues.is_empty(), "unexpected issues: {issues:?}");
}

#[test]
fn empty_base_url_is_an_error() {
    let mut config = Config::default();
    config.identity.base_url.clear();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "identity.base_url"));
}

#[test]
fn missing_scheme_is_an_error() {
    let mut config = Config::default();
    config.identity.base_url = "portal.example.com".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "identity.base_url"));
}

#[test]
fn plain_http_to_remote_host_warns() {
    let mut config = Config::default();
    config.identity.base_url = "http://portal.example.com".into();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Warning && i.field == "identity.base_url"));
}

#[test]
fn zero_timeout_is_an_error() {
    let mut config = Config::default();
    config.identity.timeout_ms = 0;
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error && i.field == "identity.timeout_ms"));
}
