//! Data models and structures for the DNS leak tester

pub mod config;
pub mod record;

// Re-export main model types
pub use config::Config;
pub use record::{RecordKind, ResultRecord, LEAK_MARKER};
