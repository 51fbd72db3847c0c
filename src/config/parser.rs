//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};
use std::path::Path;

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration, reading `.env` from the working directory
    pub fn parse(&self) -> Result<Config> {
        self.parse_from_file(Path::new(".env"))
    }

    /// Parse using `env_file` as the fallback for the process environment
    pub fn parse_from_file(&self, env_file: &Path) -> Result<Config> {
        let file_values = EnvManager::read_env_file(env_file)?;
        let mut config = Config::default();
        config.merge_from_env(&file_values)?;
        self.finish(config)
    }

    fn finish(&self, mut config: Config) -> Result<Config> {
        self.apply_cli_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// CLI flags only ever switch behavior on or color off
    fn apply_cli_overrides(&self, config: &mut Config) {
        if self.cli.no_color {
            config.enable_color = false;
        }

        if self.cli.elapsed {
            config.show_elapsed = true;
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Trigger URL: {}", config.trigger_url_template));
    summary.push(format!("Result URL: {}", config.result_url_template));
    summary.push(format!(
        "Timeout: {}",
        config.timeout_seconds.map_or("client default".to_string(), |t| format!("{}s", t))
    ));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Show Elapsed: {}", config.show_elapsed));
    summary.push(format!("Log Level: {}", config.log_level.as_str()));
    summary.push(format!("Log Format: {:?}", config.log_format));

    summary.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel};
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn parse_with_env_file(args: &[&str], content: &str) -> Result<Config> {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("leak.env");
        fs::write(&path, content).unwrap();
        ConfigParser::new(Cli::parse_from(args)).parse_from_file(&path)
    }

    #[test]
    fn test_defaults_without_flags() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigParser::new(Cli::parse_from(["dnsleak"]))
            .parse_from_file(&temp_dir.path().join(".env"))
            .unwrap();

        assert!(!config.show_elapsed);
        assert_eq!(config.trigger_url(1, 1234567), "https://1.1234567.bash.ws");
    }

    #[test]
    fn test_cli_overrides() {
        let config = parse_with_env_file(&["dnsleak", "-n", "-e"], "ENABLE_COLOR=true\n").unwrap();

        assert!(!config.enable_color);
        assert!(config.show_elapsed);
    }

    #[test]
    fn test_invalid_environment_fails() {
        let result = parse_with_env_file(&["dnsleak"], "DNSLEAK_RESULT_URL=https://bash.ws/no-token\n");
        assert_eq!(result.unwrap_err().category(), "CONFIG");
    }

    #[test]
    fn test_env_file_is_read() {
        let config = parse_with_env_file(
            &["dnsleak"],
            "DNSLEAK_LOG_FORMAT=compact\nDNSLEAK_LOG_LEVEL=debug\n",
        )
        .unwrap();

        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_summary_lists_settings() {
        let config = parse_with_env_file(&["dnsleak"], "DNSLEAK_TIMEOUT_SECONDS=20\n").unwrap();

        let summary = display_config_summary(&config);
        assert!(summary.contains("Trigger URL: https://{index}.{token}.bash.ws"));
        assert!(summary.contains("Timeout: 20s"));
        assert!(summary.contains("Log Level: WARN"));
    }
}
