//! Colored formatter implementation with terminal color support

use super::formatter::{format_duration, OutputFormatter};
use super::report::{ReportLine, Tone};
use crate::error::AppError;
use colored::*;
use std::time::Duration;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub address: Color,
    pub resolver: Color,
    pub elapsed: Color,
    pub pass_fg: Color,
    pub pass_bg: Color,
    pub fail_fg: Color,
    pub fail_bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            address: Color::Green,
            resolver: Color::Yellow,
            elapsed: Color::Yellow,
            pass_fg: Color::Black,
            pass_bg: Color::Green,
            fail_fg: Color::White,
            fail_bg: Color::Red,
        }
    }
}

/// Colored formatter implementation
#[derive(Debug, Clone, Default)]
pub struct ColoredFormatter {
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    fn paint(&self, text: &str, tone: Tone) -> ColoredString {
        let scheme = &self.color_scheme;
        match tone {
            Tone::Plain => text.normal(),
            Tone::Address => text.color(scheme.address),
            Tone::Resolver => text.color(scheme.resolver),
            Tone::Pass => text.color(scheme.pass_fg).on_color(scheme.pass_bg),
            Tone::Fail => text.color(scheme.fail_fg).on_color(scheme.fail_bg),
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_line(&self, line: &ReportLine) -> String {
        line.segments
            .iter()
            .map(|segment| self.paint(&segment.text, segment.tone).to_string())
            .collect()
    }

    fn format_elapsed(&self, elapsed: Duration) -> String {
        format!(
            "\nGathering results took {}.\n",
            format_duration(elapsed).color(self.color_scheme.elapsed)
        )
    }

    fn format_error(&self, error: &AppError) -> String {
        error.format_for_console(true)
    }
}
