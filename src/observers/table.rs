//! Table observer for pretty-printing call counts.
//!
//! Renders a [`UsageSnapshot`] as an ASCII table using the `tabled` crate,
//! one row per key in report order. History is summarized by the most
//! recent call only.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! chiamate = { version = "0.1", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use chiamate::observers::table::{TableObserver, TableStyle};
//!
//! let observer = TableObserver::new()
//!     .with_style(TableStyle::Rounded)
//!     .with_last_call(false);
//! println!("{}", observer.render(&recorder.snapshot()));
//! // ╭───────┬───────────────╮
//! // │ Calls │ Method        │
//! // ├───────┼───────────────┤
//! // │ 3     │ Cart#add      │
//! // │ 1     │ Cart#checkout │
//! // ╰───────┴───────────────╯
//! ```

use crate::snapshot::UsageSnapshot;
use tabled::{settings::Style, Table, Tabled};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// Configuration for the table observer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row.
    pub show_header: bool,
    /// Whether to add a column with the most recent call.
    pub show_last_call: bool,
    /// Custom title for the table (optional).
    pub title: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            show_last_call: true,
            title: None,
        }
    }
}

#[derive(Tabled)]
struct UsageRow {
    #[tabled(rename = "Calls")]
    calls: u64,
    #[tabled(rename = "Method")]
    method: String,
}

#[derive(Tabled)]
struct UsageRowWithLast {
    #[tabled(rename = "Calls")]
    calls: u64,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Last call")]
    last_call: String,
}

/// An observer that renders call counts as a formatted table.
#[derive(Debug, Clone, Default)]
pub struct TableObserver {
    config: TableConfig,
}

impl TableObserver {
    /// Creates a new table observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table observer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header row.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets whether to show the most recent call of each key.
    pub fn with_last_call(mut self, show: bool) -> Self {
        self.config.show_last_call = show;
        self
    }

    /// Sets an optional title for the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }
    }

    /// Renders the snapshot as a table string.
    pub fn render(&self, snapshot: &UsageSnapshot) -> String {
        let mut table = if self.config.show_last_call {
            let rows: Vec<UsageRowWithLast> = snapshot
                .iter()
                .map(|usage| UsageRowWithLast {
                    calls: usage.count,
                    method: usage.key.to_string(),
                    last_call: usage
                        .history
                        .last()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                })
                .collect();
            Table::new(&rows)
        } else {
            let rows: Vec<UsageRow> = snapshot
                .iter()
                .map(|usage| UsageRow {
                    calls: usage.count,
                    method: usage.key.to_string(),
                })
                .collect();
            Table::new(&rows)
        };

        self.apply_style(&mut table);

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }

        if let Some(ref title) = self.config.title {
            format!("{}\n{}", title, table)
        } else {
            table.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::Recorder;
    use crate::record;

    fn recorder() -> Recorder {
        let recorder = Recorder::new();
        for _ in 0..3 {
            record!(recorder, "Cart#add", 1);
        }
        record!(recorder, "Cart#checkout");
        recorder
    }

    #[test]
    fn test_render_contains_rows_in_order() {
        let output = TableObserver::new().render(&recorder().snapshot());
        assert!(output.contains("Calls"));
        assert!(output.contains("Method"));
        let add = output.find("Cart#add").unwrap();
        let checkout = output.find("Cart#checkout").unwrap();
        assert!(add < checkout);
    }

    #[test]
    fn test_render_without_header() {
        let output = TableObserver::new()
            .with_header(false)
            .with_last_call(false)
            .render(&recorder().snapshot());
        assert!(!output.contains("Calls"));
        assert!(output.contains("Cart#add"));
        assert!(output.contains('3'));
    }

    #[test]
    fn test_render_last_call() {
        let output = TableObserver::new()
            .with_style(TableStyle::Ascii)
            .render(&recorder().snapshot());
        assert!(output.contains("Last call"));
        assert!(output.contains("Cart#add([1])"));
        assert!(output.contains('+'));
    }

    #[test]
    fn test_with_title() {
        let output = TableObserver::new()
            .with_title("Usage")
            .render(&recorder().snapshot());
        assert!(output.starts_with("Usage\n"));
    }

    #[test]
    fn test_markdown_style() {
        let output = TableObserver::new()
            .with_style(TableStyle::Markdown)
            .render(&recorder().snapshot());
        assert!(output.contains('|'));
    }
}
