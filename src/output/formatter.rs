//! Core formatting trait and the plain text implementation

use super::report::{LeakReport, ReportLine};
use crate::error::AppError;
use std::time::Duration;

/// Main trait for output formatting
pub trait OutputFormatter: Send + Sync {
    /// Format one report line
    fn format_line(&self, line: &ReportLine) -> String;

    /// Format the elapsed time of the trigger phase
    fn format_elapsed(&self, elapsed: Duration) -> String;

    /// Format an error that did not stop the run
    fn format_error(&self, error: &AppError) -> String;

    /// Format the whole report, one line per report line
    fn format_report(&self, report: &LeakReport) -> String {
        report
            .lines()
            .iter()
            .map(|line| self.format_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Human-readable rendering of a duration, e.g. `1.234s` or `850.120ms`
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:.3?}", elapsed)
}

/// Formatter without any ANSI styling, for pipes and `-n`
#[derive(Debug, Clone, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_line(&self, line: &ReportLine) -> String {
        line.plain_text()
    }

    fn format_elapsed(&self, elapsed: Duration) -> String {
        format!("\nGathering results took {}.\n", format_duration(elapsed))
    }

    fn format_error(&self, error: &AppError) -> String {
        error.to_string()
    }
}
