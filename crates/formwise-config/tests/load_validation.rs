//! Config load validation tests for formwise-config.
// crates/formwise-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::io::Write;
use std::path::Path;

use formwise_config::ConfigError;
use formwise_config::FormwiseConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<FormwiseConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

#[test]
fn load_without_path_yields_valid_defaults() -> TestResult {
    let config = FormwiseConfig::load(None).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    let path = Path::new("definitely-not-present.toml");
    assert_invalid(FormwiseConfig::load(Some(path)), "config file not readable")?;
    Ok(())
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(FormwiseConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(FormwiseConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(FormwiseConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(FormwiseConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[server]\nsurprise = true\n").map_err(|err| err.to_string())?;
    assert_invalid(FormwiseConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_parses_a_complete_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(
        b"[server]\n\
          base_url = \"https://forms.example\"\n\
          connect_timeout_ms = 5000\n\
          request_timeout_ms = 20000\n\
          max_body_bytes = 1048576\n\
          \n\
          [upload]\n\
          max_file_bytes = 1048576\n\
          max_files = 4\n",
    )
    .map_err(|err| err.to_string())?;

    let config = FormwiseConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.server.base_url != "https://forms.example" {
        return Err("base_url not parsed".to_string());
    }
    if config.upload.max_files != 4 {
        return Err("max_files not parsed".to_string());
    }
    Ok(())
}

#[test]
fn load_fills_absent_sections_with_defaults() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[server]\nbase_url = \"https://forms.example\"\n")
        .map_err(|err| err.to_string())?;

    let config = FormwiseConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.upload != formwise_config::UploadConfig::default() {
        return Err("upload section did not default".to_string());
    }
    Ok(())
}
