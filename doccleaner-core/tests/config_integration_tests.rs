// doccleaner-core/tests/config_integration_tests.rs
//! Loading cleaner configurations from disk in every supported format.

use anyhow::Result;
use serde_json::json;
use std::fs;
use tempfile::tempdir;
use test_log::test;

use doccleaner_core::{
    merge_configs, CleanerConfig, CleanerRegistry, DocCleaner, Document, EngineOptions, Scalar,
};

#[test]
fn test_load_toml_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rules.toml");
    fs::write(
        &path,
        r#"
["customers.iuc"]
method = "set"
args = ["xxx"]

["customers.wife.birthdate"]
method = "set"
args = [1979-05-27T07:32:00Z]

["numid"]
method = "nil"
"#,
    )?;

    let config = CleanerConfig::load_from_file(&path)?;

    assert_eq!(config.rules.len(), 3);
    let birthdate = config
        .rules
        .iter()
        .find(|r| r.path == "customers.wife.birthdate")
        .expect("birthdate rule");
    assert!(matches!(birthdate.args[0], Document::Scalar(Scalar::Date(_))));
    let numid = config.rules.iter().find(|r| r.path == "numid").expect("numid rule");
    assert!(numid.args.is_empty());
    Ok(())
}

#[test]
fn test_load_yaml_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rules.yml");
    fs::write(
        &path,
        r#"
user.email:
  method: set
  args: ["redacted@example.com"]
user.age:
  method: set
  args: [0]
"#,
    )?;

    let config = CleanerConfig::load_from_file(&path)?;
    let cleaner = DocCleaner::from_config(&config, &CleanerRegistry::with_builtins(), EngineOptions::default())?;
    let mut doc = Document::from(json!({"user": {"email": "homer@example.com", "age": 39, "name": "homer"}}));
    cleaner.clean(&mut doc);

    assert_eq!(
        doc.to_json(),
        json!({"user": {"email": "redacted@example.com", "age": 0, "name": "homer"}})
    );
    Ok(())
}

#[test]
fn test_load_line_file_keeps_order() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rules.conf");
    fs::write(&path, "# legacy rules\nb.c = nil\n\na = set\n")?;

    let config = CleanerConfig::load_from_file(&path)?;

    assert_eq!(config.paths().collect::<Vec<_>>(), vec!["b.c", "a"]);
    assert_eq!(config.rules[0].method, "nil");
    Ok(())
}

#[test]
fn test_load_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = CleanerConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_load_rejects_invalid_paths() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("rules.conf");
    fs::write(&path, "a..b = nil\n = set\n")?;

    let err = CleanerConfig::load_from_file(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Rule validation failed"));
    assert!(message.contains("a..b"));
    Ok(())
}

#[test]
fn test_merge_file_configs() -> Result<()> {
    let dir = tempdir()?;
    let base_path = dir.path().join("base.toml");
    let overlay_path = dir.path().join("overlay.conf");
    fs::write(
        &base_path,
        r#"
["a"]
method = "set"
args = ["base"]

["b"]
method = "set"
args = ["base"]
"#,
    )?;
    fs::write(&overlay_path, "b = nil\nc = nil\n")?;

    let merged = merge_configs(
        CleanerConfig::load_from_file(&base_path)?,
        Some(CleanerConfig::load_from_file(&overlay_path)?),
    );
    let cleaner = DocCleaner::from_config(&merged, &CleanerRegistry::with_builtins(), EngineOptions::default())?;
    let mut doc = Document::from(json!({"a": 1, "b": 2, "c": 3, "d": 4}));
    cleaner.clean(&mut doc);

    assert_eq!(doc.to_json(), json!({"a": "base", "b": null, "c": null, "d": 4}));
    Ok(())
}
