//! Output formatting and display system
//!
//! The leak report is built once as styled lines and then rendered either
//! with ANSI colors or as plain text.

mod colored;
mod formatter;
mod progress;
mod report;

pub use self::colored::{ColorScheme, ColoredFormatter};
pub use formatter::{format_duration, OutputFormatter, PlainFormatter};
pub use progress::Spinner;
pub use report::{LeakReport, ReportLine, Segment, Tone, Verdict};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color preference
    pub fn create_formatter(enable_color: bool) -> Box<dyn OutputFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultRecord;

    #[test]
    fn test_factory_plain_has_no_escapes() {
        let report = LeakReport::from_records(&[ResultRecord::conclusion("DNS may be leaking.")]);
        let output = OutputFormatterFactory::create_formatter(false).format_report(&report);
        assert_eq!(output, "\nDNS may be leaking.");
    }
}
