//! Terminal reporter
//!
//! Progress and summaries on standard output. Polling progress is written
//! without a trailing newline and flushed immediately so the dots appear as
//! they happen.

use std::io::{self, Write};

use colored::*;
use ocompute_core::domain::status::StatusTone;

use super::summary::SummaryRow;
use crate::service::lifecycle::Reporter;
use crate::service::poller::PollObserver;

/// Colour for a status tone
pub fn paint(text: &str, tone: StatusTone) -> ColoredString {
    match tone {
        StatusTone::Success => text.green(),
        StatusTone::Failure => text.red(),
        StatusTone::Caution => text.yellow(),
    }
}

/// Format summary rows as `Label: value` lines with aligned values
pub fn format_summary(title: Option<&str>, rows: &[SummaryRow]) -> String {
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count() + 1)
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    if let Some(title) = title {
        out.push_str(&format!("{}\n", title.bold()));
    }
    for (label, value) in rows {
        let value = if *label == "Status" {
            paint(value, StatusTone::of(value)).to_string()
        } else {
            value.clone()
        };
        let label = format!("{:<width$}", format!("{}:", label), width = width);
        out.push_str(&format!("{} {}\n", label.cyan(), value));
    }
    out
}

/// Reporter writing to standard output
#[derive(Debug, Default)]
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }

    fn flush() {
        let _ = io::stdout().flush();
    }
}

impl PollObserver for TerminalReporter {
    fn status_changed(&mut self, status: &str) {
        print!("\nCurrent status: {}.", paint(status, StatusTone::of(status)));
        Self::flush();
    }

    fn still_waiting(&mut self) {
        print!(".");
        Self::flush();
    }

    fn reached(&mut self, _status: &str) {
        println!();
    }
}

impl Reporter for TerminalReporter {
    fn message(&mut self, text: &str) {
        println!("{}", text);
    }

    fn summary(&mut self, title: Option<&str>, rows: &[SummaryRow]) {
        println!();
        print!("{}", format_summary(title, rows));
    }
}
