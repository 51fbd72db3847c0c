//! Environment variable handling and .env file management

use crate::defaults::{DEFAULT_ENABLE_COLOR, DEFAULT_RESULT_URL, DEFAULT_TRIGGER_URL, MAX_TIMEOUT_SECS};
use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Read a .env file into a map without touching the process environment.
    ///
    /// Returns an empty map when the file does not exist.
    pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }

        let iter = dotenv::from_path_iter(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item?;
            values.insert(key, value);
        }

        Ok(values)
    }

    /// Example .env content documenting every supported setting
    pub fn create_example_env_content() -> String {
        format!(
            r#"# DNS leak tester configuration
# Process environment variables take precedence over this file.

# Test hooks only: bash.ws is the sole supported service
# Trigger hostname template; must contain {{index}} and {{token}}
DNSLEAK_TRIGGER_URL={trigger}

# Result endpoint template; must contain {{token}}
DNSLEAK_RESULT_URL={result}

# Optional request timeout in seconds (1-{max_timeout}); unset keeps client defaults
# DNSLEAK_TIMEOUT_SECONDS=30

# Color output (NO_COLOR with any value also disables it)
ENABLE_COLOR={color}

# Log level: trace, debug, info, warn, error, fatal
DNSLEAK_LOG_LEVEL=warn

# Log format: console, json, compact
DNSLEAK_LOG_FORMAT=console
"#,
            trigger = DEFAULT_TRIGGER_URL,
            result = DEFAULT_RESULT_URL,
            max_timeout = MAX_TIMEOUT_SECS,
            color = DEFAULT_ENABLE_COLOR,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let values = EnvManager::read_env_file(&temp_dir.path().join(".env")).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_reads_values_and_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "# leak test settings\nDNSLEAK_LOG_LEVEL=debug\nDNSLEAK_RESULT_URL=\"http://localhost/{token}\"\n").unwrap();

        let values = EnvManager::read_env_file(&path).unwrap();
        assert_eq!(values.get("DNSLEAK_LOG_LEVEL").map(String::as_str), Some("debug"));
        assert_eq!(values.get("DNSLEAK_RESULT_URL").map(String::as_str), Some("http://localhost/{token}"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, "THIS IS NOT VALID\n").unwrap();

        let error = EnvManager::read_env_file(&path).unwrap_err();
        assert_eq!(error.category(), "CONFIG");
    }

    #[test]
    fn test_example_env_content_is_loadable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        fs::write(&path, EnvManager::create_example_env_content()).unwrap();

        let values = EnvManager::read_env_file(&path).unwrap();
        assert_eq!(values.get("DNSLEAK_TRIGGER_URL").map(String::as_str), Some(DEFAULT_TRIGGER_URL));
        assert_eq!(values.get("DNSLEAK_RESULT_URL").map(String::as_str), Some(DEFAULT_RESULT_URL));
        assert_eq!(values.get("DNSLEAK_LOG_LEVEL").map(String::as_str), Some("warn"));
        assert!(!values.contains_key("DNSLEAK_TIMEOUT_SECONDS"));

        let mut config = crate::models::Config::default();
        config.merge_from_lookup(|key| values.get(key).cloned()).unwrap();
        config.validate().unwrap();
    }
}
