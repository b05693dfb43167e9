//! Plain-text usage summary.
//!
//! This is the report printed once at shutdown:
//!
//! ```text
//! ===== Method Usage Summary =====
//!       20  Y
//!           [2024-06-01T12:00:00+02:00] Y([1])
//!           [2024-06-01T12:00:01+02:00] Y([2])
//!       10  X
//!           [2024-06-01T12:00:02+02:00] X([])
//! ================================
//! ```
//!
//! Counts are right-justified in a fixed-width column, each key's retained
//! calls follow it oldest first, and the footer is as wide as the header.

use std::io;

use crate::observers::Result;
use crate::snapshot::{KeyUsage, UsageSnapshot};

/// Layout of the text report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFormat {
    /// Title shown in the header line.
    pub title: String,
    /// Width of the right-justified count column.
    pub count_width: usize,
    /// Number of spaces before each history line.
    pub history_indent: usize,
    /// Whether history lines are printed at all.
    pub show_history: bool,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            title: "Method Usage Summary".to_string(),
            count_width: 8,
            history_indent: 10,
            show_history: true,
        }
    }
}

/// Renders a [`UsageSnapshot`] as the plain-text usage summary.
///
/// # Examples
///
/// ```rust
/// use chiamate::observers::text::TextObserver;
/// use chiamate::recorder::Recorder;
/// use chiamate::record;
///
/// let recorder = Recorder::new();
/// record!(recorder, "Cart#add", 1);
///
/// let report = TextObserver::new()
///     .show_history(false)
///     .render(&recorder.snapshot());
///
/// assert_eq!(
///     report,
///     "===== Method Usage Summary =====\n       1  Cart#add\n================================\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextObserver {
    format: TextFormat,
}

impl TextObserver {
    /// Creates an observer with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an observer with the given layout.
    pub fn with_format(format: TextFormat) -> Self {
        Self { format }
    }

    /// Sets the header title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.format.title = title.into();
        self
    }

    /// Sets the width of the count column.
    pub fn count_width(mut self, width: usize) -> Self {
        self.format.count_width = width;
        self
    }

    /// Sets the indentation of history lines.
    pub fn history_indent(mut self, indent: usize) -> Self {
        self.format.history_indent = indent;
        self
    }

    /// Enables or disables history lines.
    pub fn show_history(mut self, show: bool) -> Self {
        self.format.show_history = show;
        self
    }

    /// The layout in use.
    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    /// Renders the full report, newline terminated.
    pub fn render(&self, snapshot: &UsageSnapshot) -> String {
        let header = format!("===== {} =====", self.format.title);
        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');

        for usage in snapshot {
            self.render_usage(usage, &mut out);
        }

        out.push_str(&"=".repeat(header.chars().count()));
        out.push('\n');
        out
    }

    /// Renders the report into an I/O sink.
    pub fn write_to<W: io::Write + ?Sized>(&self, snapshot: &UsageSnapshot, sink: &mut W) -> Result<()> {
        sink.write_all(self.render(snapshot).as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn render_usage(&self, usage: &KeyUsage, out: &mut String) {
        out.push_str(&format!(
            "{:>width$}  {}\n",
            usage.count,
            usage.key,
            width = self.format.count_width
        ));

        if !self.format.show_history {
            return;
        }

        let indent = " ".repeat(self.format.history_indent);
        for record in &usage.history {
            out.push_str(&indent);
            out.push_str(&record.to_string());
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::MethodKey;
    use crate::record::CallRecord;
    use chrono::{DateTime, FixedOffset};

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn usage(key: &str, count: u64, args: &[&str]) -> KeyUsage {
        let key = MethodKey::from(key);
        KeyUsage {
            key: key.clone(),
            count,
            history: args
                .iter()
                .map(|a| CallRecord::new(ts("2024-06-01T12:00:00+02:00"), key.clone(), *a))
                .collect(),
        }
    }

    #[test]
    fn test_empty_report() {
        let snapshot = UsageSnapshot::new(ts("2024-06-01T12:00:00Z"), Vec::new());
        let report = TextObserver::new().render(&snapshot);
        assert_eq!(
            report,
            "===== Method Usage Summary =====\n================================\n"
        );
    }

    #[test]
    fn test_full_layout() {
        let snapshot = UsageSnapshot::new(
            ts("2024-06-01T12:00:00Z"),
            vec![usage("X", 10, &["[]"]), usage("Y", 20, &["[1]", "[2]"])],
        );
        let report = TextObserver::new().render(&snapshot);
        let expected = "\
===== Method Usage Summary =====
      20  Y
          [2024-06-01T12:00:00+02:00] Y([1])
          [2024-06-01T12:00:00+02:00] Y([2])
      10  X
          [2024-06-01T12:00:00+02:00] X([])
================================
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_wide_count_is_not_truncated() {
        let snapshot = UsageSnapshot::new(ts("2024-06-01T12:00:00Z"), vec![usage("K", 123_456_789, &[])]);
        let report = TextObserver::new().render(&snapshot);
        assert!(report.contains("\n123456789  K\n"));
    }

    #[test]
    fn test_custom_format() {
        let snapshot = UsageSnapshot::new(ts("2024-06-01T12:00:00Z"), vec![usage("K", 3, &["[x]"])]);
        let report = TextObserver::new()
            .with_title("Calls")
            .count_width(4)
            .history_indent(2)
            .render(&snapshot);
        assert_eq!(
            report,
            "===== Calls =====\n   3  K\n  [2024-06-01T12:00:00+02:00] K([x])\n=================\n"
        );
    }

    #[test]
    fn test_write_to_sink() {
        let snapshot = UsageSnapshot::new(ts("2024-06-01T12:00:00Z"), vec![usage("K", 1, &[])]);
        let mut sink: Vec<u8> = Vec::new();
        TextObserver::new().write_to(&snapshot, &mut sink).unwrap();
        assert_eq!(
            String::from_utf8(sink).unwrap(),
            TextObserver::new().render(&snapshot)
        );
    }
}
