//! DNS Leak Tester
//!
//! Finds out which DNS resolvers actually answer for this machine. A random
//! token is embedded in hostnames under a cooperating service's domain, those
//! hostnames are requested concurrently so that the system resolver has to
//! look them up, and the service then reports which resolvers asked.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, RecordKind, ResultRecord};
pub use output::{ColoredFormatter, LeakReport, OutputFormatter, OutputFormatterFactory, PlainFormatter, Verdict};
pub use probe::{Prober, Token, TokenGenerator};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Build metadata recorded by build.rs
pub fn build_info() -> String {
    format!(
        "commit {}, built {} for {}",
        option_env!("GIT_COMMIT").unwrap_or("unknown"),
        env!("BUILD_TIME"),
        env!("TARGET_TRIPLE"),
    )
}

/// Default configuration values
pub mod defaults {
    /// Number of concurrent trigger requests per run
    pub const TRIGGER_COUNT: u32 = 10;
    /// Smallest token value (inclusive)
    pub const TOKEN_MIN: u32 = 1_000_000;
    /// Upper token bound (exclusive)
    pub const TOKEN_MAX: u32 = 9_999_999;
    /// The bash.ws service is the only supported back-end. The URL settings
    /// exist so tests can point both phases at a local mock server.
    pub const DEFAULT_TRIGGER_URL: &str = "https://{index}.{token}.bash.ws";
    pub const DEFAULT_RESULT_URL: &str = "https://bash.ws/dnsleak/test/{token}?json";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const MAX_TIMEOUT_SECS: u64 = 300;
}
