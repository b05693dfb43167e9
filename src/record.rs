//! Call records and argument rendering.
//!
//! A [`CallRecord`] is one retained invocation: when it happened, which key
//! it belongs to and the rendered argument text. Records are immutable once
//! built.
//!
//! Argument rendering is best effort. [`render_args`] formats every argument
//! with its `Debug` impl; an argument whose impl fails (returns
//! [`fmt::Error`] or panics) is replaced by [`RENDER_PLACEHOLDER`] and the
//! remaining arguments are still rendered.

use std::fmt::{self, Debug, Write};
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::key::MethodKey;

/// Text substituted for an argument that could not be rendered.
pub const RENDER_PLACEHOLDER: &str = "<unrenderable>";

/// One retained invocation of a method.
///
/// Displays as `[<ISO-8601 timestamp>] <key>(<args>)`:
///
/// ```rust
/// use chiamate::key::MethodKey;
/// use chiamate::record::CallRecord;
/// use chrono::DateTime;
///
/// let ts = DateTime::parse_from_rfc3339("2024-05-01T10:00:00+02:00").unwrap();
/// let record = CallRecord::new(ts, MethodKey::from("Cart#add"), "[3, \"apple\"]");
/// assert_eq!(
///     record.to_string(),
///     "[2024-05-01T10:00:00+02:00] Cart#add([3, \"apple\"])"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallRecord {
    timestamp: DateTime<FixedOffset>,
    key: MethodKey,
    args: String,
}

impl CallRecord {
    /// Creates a record from already rendered argument text.
    pub fn new(timestamp: DateTime<FixedOffset>, key: MethodKey, args: impl Into<String>) -> Self {
        Self {
            timestamp,
            key,
            args: args.into(),
        }
    }

    /// When the call was recorded.
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// The key the call was recorded under.
    pub fn key(&self) -> &MethodKey {
        &self.key
    }

    /// The rendered argument text.
    pub fn args(&self) -> &str {
        &self.args
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}({})",
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            self.key,
            self.args
        )
    }
}

/// Renders call arguments as `[a, b, c]`.
///
/// Never panics and never fails. Panics raised by an argument's `Debug` impl
/// are caught (this requires the default `panic = "unwind"` strategy); the
/// panic hook still runs, so the usual panic message is printed.
///
/// ```rust
/// use chiamate::record::render_args;
///
/// assert_eq!(render_args(&[]), "[]");
/// assert_eq!(render_args(&[&1, &"two", &Some(3.5)]), "[1, \"two\", Some(3.5)]");
/// ```
pub fn render_args(args: &[&dyn Debug]) -> String {
    let mut out = String::from("[");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match render_one(*arg) {
            Some(text) => out.push_str(&text),
            None => {
                tracing::debug!(position = i, "argument rendering failed, using placeholder");
                out.push_str(RENDER_PLACEHOLDER);
            }
        }
    }
    out.push(']');
    out
}

fn render_one(arg: &dyn Debug) -> Option<String> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let mut text = String::new();
        write!(text, "{:?}", arg).ok().map(|_| text)
    }))
    .ok()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingDebug;

    impl Debug for FailingDebug {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    struct PanickingDebug;

    impl Debug for PanickingDebug {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("cannot render");
        }
    }

    fn ts() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-01-02T03:04:05.250+00:00").unwrap()
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_args(&[]), "[]");
    }

    #[test]
    fn test_render_mixed() {
        let name = String::from("bob");
        assert_eq!(render_args(&[&42u32, &name, &vec![1, 2]]), "[42, \"bob\", [1, 2]]");
    }

    #[test]
    fn test_render_error_uses_placeholder() {
        let text = render_args(&[&1, &FailingDebug, &3]);
        assert_eq!(text, format!("[1, {}, 3]", RENDER_PLACEHOLDER));
    }

    #[test]
    fn test_render_panic_uses_placeholder() {
        let text = render_args(&[&PanickingDebug, &"ok"]);
        assert_eq!(text, format!("[{}, \"ok\"]", RENDER_PLACEHOLDER));
    }

    #[test]
    fn test_record_display() {
        let record = CallRecord::new(ts(), MethodKey::from("A#b"), "[1]");
        assert_eq!(record.to_string(), "[2024-01-02T03:04:05.250+00:00] A#b([1])");
    }

    #[test]
    fn test_record_accessors() {
        let record = CallRecord::new(ts(), MethodKey::from("A#b"), "[]");
        assert_eq!(record.timestamp(), ts());
        assert_eq!(record.key().as_str(), "A#b");
        assert_eq!(record.args(), "[]");
    }
}
