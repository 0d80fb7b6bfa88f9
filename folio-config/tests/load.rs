use std::{fs, sync::Mutex};

use folio_config::{
    CONFIG_JSON_ENV, CONFIG_PATH_ENV, ConfigSource, ConfigValidationError,
    FolioConfig,
};
use tempfile::tempdir;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in [CONFIG_PATH_ENV, CONFIG_JSON_ENV] {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn toml_file_by_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("folio.toml");
    fs::write(
        &path,
        "[carousel]\nitems_per_page = 3\nsettle_ms = 450\n\n[query]\nbase_url = \"widgets.example.com\"\n",
    )
    .unwrap();

    let config = FolioConfig::load_from_file(&path).expect("load toml");
    assert_eq!(config.carousel.items_per_page(), 3);
    assert_eq!(config.carousel.settle_ms(), 450);
    assert_eq!(config.query.base_url.as_deref(), Some("widgets.example.com"));
    assert!(config.validate().is_ok());
}

#[test]
fn json_file_by_extension() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("folio.json");
    fs::write(&path, r#"{"ambient": {"disabled": true}}"#).unwrap();

    let config = FolioConfig::load_from_file(&path).expect("load json");
    assert!(config.ambient.disabled);
    assert_eq!(config.carousel, Default::default());
}

#[test]
fn unknown_extension_sniffs_format() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("folio.conf");
    fs::write(&path, r#"{"query": {"retries": 0}}"#).unwrap();

    let config = FolioConfig::load_from_file(&path).expect("load sniffed");
    assert_eq!(config.query.retries(), 0);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nope.toml");
    let err = FolioConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn out_of_range_resistance_fails_validation() {
    let config = FolioConfig::parse_from_str(
        "[carousel]\nelastic_resistance = 1.5\n",
        "inline",
    )
    .unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigValidationError::Carousel(_))
    ));
}

#[test]
fn zero_ambient_interval_fails_validation() {
    let config =
        FolioConfig::parse_from_str("[ambient]\ninterval_ms = 0\n", "inline")
            .unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigValidationError::Ambient(_))
    ));
}

#[test]
fn env_sources_in_priority_order() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[carousel]\nitems_per_page = 5\n").unwrap();

    unsafe {
        std::env::set_var(CONFIG_JSON_ENV, r#"{"carousel": {"items_per_page": 2}}"#)
    };
    let (config, source) = FolioConfig::load_from_env().expect("inline json");
    assert_eq!(source, ConfigSource::EnvInline);
    assert_eq!(config.carousel.items_per_page(), 2);

    unsafe { std::env::set_var(CONFIG_PATH_ENV, &path) };
    let (config, source) = FolioConfig::load_from_env().expect("env path");
    assert_eq!(source, ConfigSource::EnvPath(path.clone()));
    assert_eq!(config.carousel.items_per_page(), 5);

    unsafe {
        std::env::remove_var(CONFIG_PATH_ENV);
        std::env::set_var(CONFIG_JSON_ENV, r#"{"carousel": {"items_per_page": 0}}"#);
    }
    assert!(FolioConfig::load_from_env().is_err());

    clear_env();
}
