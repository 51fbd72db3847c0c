//! Configuration data model and validation

use crate::error::{AppError, Result};
use crate::logging::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Placeholder substituted with the 1-based trigger index
pub const INDEX_PLACEHOLDER: &str = "{index}";
/// Placeholder substituted with the test token
pub const TOKEN_PLACEHOLDER: &str = "{token}";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// URL template for the trigger requests. Only meant to be overridden
    /// by tests that replace bash.ws with a local mock server.
    #[serde(default = "default_trigger_url")]
    pub trigger_url_template: String,

    /// URL template for the result lookup; a test hook like the trigger template
    #[serde(default = "default_result_url")]
    pub result_url_template: String,

    /// Request timeout; `None` keeps the HTTP client defaults
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Print how long the trigger phase took
    #[serde(default)]
    pub show_elapsed: bool,

    /// Minimum level written by the loggers
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    /// Log line format
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trigger_url_template: default_trigger_url(),
            result_url_template: default_result_url(),
            timeout_seconds: None,
            enable_color: default_enable_color(),
            show_elapsed: false,
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// URL hit by trigger request `index` for `token`
    pub fn trigger_url(&self, index: u32, token: u32) -> String {
        self.trigger_url_template
            .replace(INDEX_PLACEHOLDER, &index.to_string())
            .replace(TOKEN_PLACEHOLDER, &token.to_string())
    }

    /// URL returning the JSON result set for `token`
    pub fn result_url(&self, token: u32) -> String {
        self.result_url_template
            .replace(TOKEN_PLACEHOLDER, &token.to_string())
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if !self.trigger_url_template.contains(INDEX_PLACEHOLDER)
            || !self.trigger_url_template.contains(TOKEN_PLACEHOLDER)
        {
            return Err(AppError::config(format!(
                "Trigger URL template must contain {} and {}: {}",
                INDEX_PLACEHOLDER, TOKEN_PLACEHOLDER, self.trigger_url_template
            )));
        }

        if !self.result_url_template.contains(TOKEN_PLACEHOLDER) {
            return Err(AppError::config(format!(
                "Result URL template must contain {}: {}",
                TOKEN_PLACEHOLDER, self.result_url_template
            )));
        }

        // Render with sample values so placeholders inside the host still parse
        let sample_token = crate::defaults::TOKEN_MIN;
        for (name, rendered) in [
            ("trigger", self.trigger_url(1, sample_token)),
            ("result", self.result_url(sample_token)),
        ] {
            match url::Url::parse(&rendered) {
                Ok(parsed) => {
                    if !matches!(parsed.scheme(), "http" | "https") {
                        return Err(AppError::config(format!(
                            "The {} URL must use http or https: {}", name, rendered
                        )));
                    }
                }
                Err(e) => {
                    return Err(AppError::config(format!("Invalid {} URL '{}': {}", name, rendered, e)));
                }
            }
        }

        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(AppError::config("Timeout must be greater than 0"));
            }

            if timeout > crate::defaults::MAX_TIMEOUT_SECS {
                return Err(AppError::config(format!(
                    "Timeout cannot exceed {} seconds", crate::defaults::MAX_TIMEOUT_SECS
                )));
            }
        }

        Ok(())
    }

    /// Merge environment variables into this configuration, falling back to
    /// values read from a .env file for keys the process environment lacks
    pub fn merge_from_env(&mut self, file_values: &HashMap<String, String>) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok().or_else(|| file_values.get(key).cloned()))
    }

    /// Merge settings from an arbitrary key lookup, e.g. a parsed `.env` map
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(template) = lookup("DNSLEAK_TRIGGER_URL") {
            self.trigger_url_template = template.trim().to_string();
        }

        if let Some(template) = lookup("DNSLEAK_RESULT_URL") {
            self.result_url_template = template.trim().to_string();
        }

        if let Some(timeout) = lookup("DNSLEAK_TIMEOUT_SECONDS") {
            let timeout = timeout.trim();
            self.timeout_seconds = if timeout.is_empty() {
                None
            } else {
                Some(timeout.parse()
                    .map_err(|e| AppError::config(format!("Invalid DNSLEAK_TIMEOUT_SECONDS value '{}': {}", timeout, e)))?)
            };
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        // https://no-color.org: presence alone disables color
        if lookup("NO_COLOR").is_some() {
            self.enable_color = false;
        }

        if let Some(level) = lookup("DNSLEAK_LOG_LEVEL") {
            self.log_level = level.parse()
                .map_err(|e| AppError::config(format!("Invalid DNSLEAK_LOG_LEVEL value '{}': {}", level, e)))?;
        }

        if let Some(format) = lookup("DNSLEAK_LOG_FORMAT") {
            self.log_format = format.parse()
                .map_err(|e| AppError::config(format!("Invalid DNSLEAK_LOG_FORMAT value '{}': {}", format, e)))?;
        }

        Ok(())
    }
}

fn default_trigger_url() -> String {
    crate::defaults::DEFAULT_TRIGGER_URL.to_string()
}

fn default_result_url() -> String {
    crate::defaults::DEFAULT_RESULT_URL.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_format() -> LogFormat {
    LogFormat::Console
}
