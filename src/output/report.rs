//! Leak report built from the service's result records
//!
//! The report is a list of lines made of styled segments. Formatters decide
//! how each [`Tone`] looks, so the classification can be tested without
//! looking at ANSI escape codes.

use crate::models::{RecordKind, ResultRecord};

/// Column width of IP addresses in report lines
const IP_WIDTH: usize = 15;

/// Visual role of a piece of report text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Unstyled text
    Plain,
    /// The client's public address
    Address,
    /// An observed resolver address
    Resolver,
    /// Conclusion reporting no leak
    Pass,
    /// Conclusion reporting a probable leak
    Fail,
}

/// A run of text rendered in one tone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

impl Segment {
    pub fn new<S: Into<String>>(text: S, tone: Tone) -> Self {
        Self { text: text.into(), tone }
    }

    pub fn plain<S: Into<String>>(text: S) -> Self {
        Self::new(text, Tone::Plain)
    }
}

/// One output line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportLine {
    pub segments: Vec<Segment>,
}

impl ReportLine {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    /// Line text without any styling
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Tone of the first styled segment, if any
    #[cfg(test)]
    fn highlight(&self) -> Option<Tone> {
        self.segments.iter().map(|s| s.tone).find(|tone| *tone != Tone::Plain)
    }
}

/// Outcome stated by the service's conclusion record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No unexpected resolvers seen
    Clean,
    /// Conclusion says DNS "may be" leaking
    ProbableLeak,
}

/// Report for one leak test run
#[derive(Debug, Clone, Default)]
pub struct LeakReport {
    lines: Vec<ReportLine>,
    resolver_count: usize,
    verdict: Option<Verdict>,
}

impl LeakReport {
    /// Walk the records once, in service order
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut report = Self::default();

        for record in records {
            match record.kind {
                RecordKind::Ip => {
                    report.lines.push(ReportLine::new(vec![
                        Segment::plain("Your IP Address: "),
                        Segment::new(record.ip.as_str(), Tone::Address),
                        Segment::plain(format!(
                            "{:pad$} ({}, {})",
                            "",
                            record.country_name,
                            record.asn,
                            pad = IP_WIDTH.saturating_sub(record.ip.chars().count()),
                        )),
                    ]));
                    report.lines.push(ReportLine::blank());
                }
                RecordKind::Dns => {
                    report.resolver_count += 1;
                    report.lines.push(ReportLine::new(vec![
                        Segment::plain(format!("DNS [{:2}]: ", report.resolver_count)),
                        Segment::new(format!("{:>width$}", record.ip, width = IP_WIDTH), Tone::Resolver),
                        Segment::plain(format!(" ({}, {})", record.country_name, record.asn)),
                    ]));
                }
                RecordKind::Conclusion => {
                    let (verdict, tone) = if record.indicates_leak() {
                        (Verdict::ProbableLeak, Tone::Fail)
                    } else {
                        (Verdict::Clean, Tone::Pass)
                    };
                    report.verdict = Some(verdict);
                    report.lines.push(ReportLine::blank());
                    report.lines.push(ReportLine::new(vec![Segment::new(record.text(), tone)]));
                }
                RecordKind::Unknown => {}
            }
        }

        report
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    /// Number of `dns` records reported
    pub fn resolver_count(&self) -> usize {
        self.resolver_count
    }

    /// `None` when the service sent no conclusion
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
