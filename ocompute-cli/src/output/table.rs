//! Column-aligned tables
//!
//! Cells are padded to the column width before colouring, so escape codes
//! never disturb alignment.

use colored::*;
use ocompute_core::domain::status::StatusTone;

use super::terminal::paint;

const COLUMN_GAP: &str = "  ";

/// A table cell, optionally coloured by status tone
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    text: String,
    tone: Option<StatusTone>,
}

impl Cell {
    /// Plain cell
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: None,
        }
    }

    /// Cell holding a remote status, coloured by its tone
    pub fn status(text: impl Into<String>) -> Self {
        let text = text.into();
        let tone = Some(StatusTone::of(&text));
        Self { text, tone }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::plain(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::plain(text)
    }
}

/// Rows under a bold header line
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing trailing cells render empty
    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Sort rows by the text of one column
    pub fn sort_by_column(&mut self, column: usize) {
        self.rows.sort_by(|a, b| {
            let a = a.get(column).map(Cell::text).unwrap_or_default();
            let b = b.get(column).map(Cell::text).unwrap_or_default();
            a.cmp(b)
        });
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.text.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Render the table, one line per row, each ending in a newline
    pub fn render(&self) -> String {
        let widths = self.widths();
        let last = widths.len().saturating_sub(1);
        let mut out = String::new();

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(column, (header, width))| {
                let padded = pad(header, *width, column == last);
                padded.bold().to_string()
            })
            .collect();
        out.push_str(&header.join(COLUMN_GAP));
        out.push('\n');

        let empty = Cell::plain("");
        for row in &self.rows {
            let line: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(column, width)| {
                    let cell = row.get(column).unwrap_or(&empty);
                    let padded = pad(&cell.text, *width, column == last);
                    match cell.tone {
                        Some(tone) => paint(&padded, tone).to_string(),
                        None => padded,
                    }
                })
                .collect();
            out.push_str(&line.join(COLUMN_GAP));
            out.push('\n');
        }

        out
    }
}

fn pad(text: &str, width: usize, last: bool) -> String {
    if last {
        text.to_string()
    } else {
        format!("{:<width$}", text, width = width)
    }
}
