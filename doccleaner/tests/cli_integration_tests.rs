// doccleaner/tests/cli_integration_tests.rs
//! Command-line integration tests for the `doccleaner` binary.
//!
//! Every test writes its configuration into a temporary directory, runs the
//! binary through `assert_cmd` and inspects stdout, stderr and the exit code.
//! Summaries go to stderr and the cleaned JSON to stdout, so the two can be
//! asserted on separately.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const CUSTOMERS_TOML: &str = r##"
["customers.iuc"]
method = "set"
args = ["xxx"]

["customers.email"]
method = "mask"

["customers.phone"]
method = "replace"
args = ["\\d", "#"]

["numid"]
method = "nil"
"##;

const CUSTOMERS_JSON: &str =
    r#"{"customers":[{"iuc":"1234","email":"h@s.io","phone":"555-01","name":"homer"}],"numid":42}"#;

fn doccleaner() -> Command {
    let mut cmd = Command::cargo_bin("doccleaner").unwrap();
    cmd.env("RUST_LOG", "debug");
    cmd.env_remove("DOCCLEANER_CONFIG");
    cmd
}

fn write_config(dir: &TempDir, name: &str, text: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, text)?;
    Ok(path)
}

fn stdout_json(output: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(output)?)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_clean_from_stdin() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.toml", CUSTOMERS_TOML)?;

    let assert = doccleaner()
        .args(["clean", "--config", arg(&config)])
        .write_stdin(CUSTOMERS_JSON)
        .assert()
        .success()
        .stderr(predicate::str::contains("Fields cleaned: 4"));

    let cleaned = stdout_json(&assert.get_output().stdout)?;
    assert_eq!(
        cleaned,
        json!({"customers": [{"iuc": "xxx", "email": "******", "phone": "###-##", "name": "homer"}], "numid": null})
    );
    Ok(())
}

#[test]
fn test_clean_keeps_large_unsigned_integers() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.conf", "leaf1 = nil\n")?;

    doccleaner()
        .args(["clean", "--config", arg(&config), "--no-summary"])
        .write_stdin(r#"{"id":18446744073709551615,"leaf1":"v"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""id":18446744073709551615"#));
    Ok(())
}

#[test]
fn test_clean_input_and_output_files() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.yaml", "secret:\n  method: hash\n  args: [\"salt\"]\n")?;
    let input = write_config(&dir, "in.json", r#"{"secret":"abc","keep":true}"#)?;
    let output = dir.path().join("out.json");

    doccleaner()
        .args(["clean", "-c", arg(&config), "-i", arg(&input), "-o", arg(&output), "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Writing cleaned content to file"));

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(written["keep"], json!(true));
    let digest = written["secret"].as_str().unwrap();
    assert_eq!(digest.len(), 64);
    assert_ne!(digest, "abc");
    Ok(())
}

#[test]
fn test_clean_json_lines() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.conf", "user.name = nil\n")?;

    let assert = doccleaner()
        .args(["clean", "--config", arg(&config), "--lines", "--no-summary"])
        .write_stdin("{\"user\":{\"name\":\"a\",\"id\":1}}\n{\"user\":[{\"name\":\"b\"}]}\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Clean Summary").not());

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let docs: Vec<Value> = stdout.lines().map(serde_json::from_str).collect::<Result<_, _>>()?;
    assert_eq!(
        docs,
        vec![json!({"user": {"name": null, "id": 1}}), json!({"user": [{"name": null}]})]
    );
    Ok(())
}

#[test]
fn test_scalar_array_is_left_alone_without_fallback() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.toml", "[\"leaf1\"]\nmethod = \"set\"\nargs = [1234]\n")?;

    let assert = doccleaner()
        .args(["clean", "--config", arg(&config), "--no-summary"])
        .write_stdin(r#"["a","b"]"#)
        .assert()
        .success();
    assert_eq!(stdout_json(&assert.get_output().stdout)?, json!(["a", "b"]));

    let assert = doccleaner()
        .args(["clean", "--config", arg(&config), "--no-summary", "--root-scalar-fallback"])
        .write_stdin(r#"["a","b"]"#)
        .assert()
        .success();
    assert_eq!(stdout_json(&assert.get_output().stdout)?, json!([1234, 1234]));
    Ok(())
}

#[test]
fn test_strict_exits_non_zero_on_field_failures() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(
        &dir,
        "rules.toml",
        "[\"when\"]\nmethod = \"date\"\nargs = [\"%Y-%m-%d\", \"yesterday\"]\n",
    )?;

    // Without --strict the failure is only reported.
    doccleaner()
        .args(["clean", "--config", arg(&config)])
        .write_stdin(r#"{"when":"2020-01-01"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"when":"2020-01-01"}"#))
        .stderr(predicate::str::contains("Fields failed: 1"));

    doccleaner()
        .args(["clean", "--config", arg(&config), "--strict"])
        .write_stdin(r#"{"when":"2020-01-01"}"#)
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test_unknown_operation_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.conf", "leaf1 = doesnotexist\n")?;
    let input = write_config(&dir, "in.json", "{}")?;

    doccleaner()
        .args(["clean", "--config", arg(&config), "-i", arg(&input)])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unknown operation 'doesnotexist'"));
    Ok(())
}

#[test]
fn test_invalid_json_is_an_error() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.conf", "a = nil\n")?;

    doccleaner()
        .args(["clean", "--config", arg(&config)])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid JSON"));
    Ok(())
}

#[test]
fn test_check_lists_configured_paths() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.toml", CUSTOMERS_TOML)?;

    doccleaner()
        .args(["check", "--config", arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("customers.email = mask"))
        .stdout(predicate::str::contains(r#"customers.iuc = set ["xxx"]"#))
        .stdout(predicate::str::contains("numid = nil"));
    Ok(())
}

#[test]
fn test_check_rejects_empty_segments() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.conf", "a..b = nil\n")?;

    doccleaner()
        .args(["check", "--config", arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty segment"));
    Ok(())
}

#[test]
fn test_config_found_in_working_directory() -> Result<()> {
    let dir = tempdir()?;
    write_config(&dir, "doccleaner.toml", "[\"token\"]\nmethod = \"nil\"\n")?;

    let assert = doccleaner()
        .current_dir(dir.path())
        .args(["clean", "--no-summary"])
        .write_stdin(r#"{"token":"t0k3n","id":7}"#)
        .assert()
        .success();
    assert_eq!(stdout_json(&assert.get_output().stdout)?, json!({"token": null, "id": 7}));
    Ok(())
}

#[test]
fn test_missing_config_is_reported() -> Result<()> {
    let dir = tempdir()?;

    doccleaner()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .args(["check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn test_quiet_suppresses_summary() -> Result<()> {
    let dir = tempdir()?;
    let config = write_config(&dir, "rules.conf", "a = nil\n")?;

    doccleaner()
        .args(["--quiet", "clean", "--config", arg(&config)])
        .write_stdin(r#"{"a":1}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"a":null}"#))
        .stderr(predicate::str::is_empty());
    Ok(())
}
