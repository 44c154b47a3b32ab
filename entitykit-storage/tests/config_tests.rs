use entitykit_storage::StorageConfig;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn defaults() {
    let config = StorageConfig::default();
    assert!(config.validate_on_save);
    assert_eq!(config.first_id, 1);
    assert_eq!(config.default_bundle, "default");
}

#[test]
fn parse_full_document() {
    let config = StorageConfig::from_toml_str(
        r#"
        validate_on_save = false
        first_id = 100
        default_bundle = "article"
        "#,
    )
    .unwrap();
    assert_eq!(
        config,
        StorageConfig {
            validate_on_save: false,
            first_id: 100,
            default_bundle: "article".into(),
        }
    );
}

#[test]
fn missing_keys_take_defaults() {
    let config = StorageConfig::from_toml_str("first_id = 7").unwrap();
    assert_eq!(config.first_id, 7);
    assert!(config.validate_on_save);
    assert_eq!(config.default_bundle, "default");
}

#[test]
fn parse_error_is_reported() {
    assert!(StorageConfig::from_toml_str("first_id = \"seven\"").is_err());
}

#[test]
fn load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::load_from(&dir.path().join("storage.toml"));
    assert_eq!(config, StorageConfig::default());
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "default_bundle = \"page\"").unwrap();

    let config = StorageConfig::load_from(&path);
    assert_eq!(config.default_bundle, "page");
    assert_eq!(config.first_id, 1);
}

#[test]
fn load_unparseable_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.toml");
    std::fs::write(&path, "this is not = = toml").unwrap();
    assert_eq!(StorageConfig::load_from(&path), StorageConfig::default());
}
