// Configuration file loader for the transcript API
//
// Settings may be provided in a flat TOML file next to the binary. Values are
// exported as environment variables before the config structs are built, so
// real environment variables always win over file values.

use std::env;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use toml::Value;

/// Default configuration file location
pub const CONFIG_FILE_PATH: &str = "transcript_api.conf";

/// Load the default configuration file, if present.
///
/// Returns the number of settings applied to the environment, or 0 when the
/// file is missing or unreadable (both are non-fatal).
pub fn load_config() -> usize {
    apply_config_file(Path::new(CONFIG_FILE_PATH))
}

/// Read a flat TOML file and export its scalar entries as environment
/// variables, skipping keys that are already set.
pub fn apply_config_file(config_path: &Path) -> usize {
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(_) => {
            debug!(
                "Configuration file not found at: {}",
                config_path.display()
            );
            return 0;
        }
    };

    let table = match content.parse::<Value>() {
        Ok(Value::Table(table)) => table,
        Ok(_) => {
            warn!("Configuration file is not a TOML table, ignoring it");
            return 0;
        }
        Err(e) => {
            warn!("Failed to parse configuration file: {}", e);
            return 0;
        }
    };

    let mut applied = 0;
    for (key, value) in table {
        let Some(rendered) = render_scalar(&value) else {
            // Arrays and nested tables have no env var representation
            warn!("Skipping unsupported TOML value type for key: {}", key);
            continue;
        };

        if env::var(&key).is_ok() {
            debug!("Env var already exists, skipping: {}", key);
            continue;
        }

        debug!("Setting env var from config file: {} = {}", key, rendered);
        env::set_var(&key, rendered);
        applied += 1;
    }

    if applied > 0 {
        info!(
            "Applied {} settings from {}",
            applied,
            config_path.display()
        );
    }
    applied
}

/// Render a scalar TOML value as an env var string
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(f.to_string()),
        Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_applies_nothing() {
        assert_eq!(apply_config_file(Path::new("/nonexistent/file.conf")), 0);
    }

    #[test]
    fn scalar_values_are_exported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.conf");
        fs::write(
            &path,
            "TEST_LOADER_STR = \"abc\"\nTEST_LOADER_NUM = 42\nTEST_LOADER_NESTED = [1, 2]\n",
        )
        .unwrap();

        let applied = apply_config_file(&path);
        assert_eq!(applied, 2);
        assert_eq!(env::var("TEST_LOADER_STR").unwrap(), "abc");
        assert_eq!(env::var("TEST_LOADER_NUM").unwrap(), "42");
        assert!(env::var("TEST_LOADER_NESTED").is_err());
    }

    #[test]
    fn existing_env_vars_are_not_overwritten() {
        env::set_var("TEST_LOADER_KEEP", "original");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.conf");
        fs::write(&path, "TEST_LOADER_KEEP = \"replaced\"\n").unwrap();

        apply_config_file(&path);
        assert_eq!(env::var("TEST_LOADER_KEEP").unwrap(), "original");
    }
}
