//! # Chiamate - Concurrent Method Usage Recorder
//!
//! An in-process recorder of method invocations. Something in the host
//! program (a wrapper, a middleware layer, explicit call-site
//! instrumentation) calls [`Recorder::record`](recorder::Recorder::record)
//! with a key and the call arguments; the recorder keeps
//!
//! - an exact running count per key, and
//! - the most recent calls per key, in a bounded history,
//!
//! and a [`Reporter`](reporter::Reporter) prints one deterministic summary
//! when the process shuts down.
//!
//! ## Design
//!
//! 1. **Sharded registry**: keys live in a sharded concurrent map. A key's
//!    state is created on first use through an atomic insert-if-absent, so
//!    racing first calls share a single counter and a single history.
//!
//! 2. **Sharded counters**: every key owns an
//!    [`Unsigned`](counters::unsigned::Unsigned) counter spread over 64
//!    cache-padded slots. Hot methods called from many threads do not
//!    contend on one atomic.
//!
//! 3. **Per-key history lock**: each [`HistoryBuffer`](history::HistoryBuffer)
//!    is a ring with its own lock; recording into one key never waits on
//!    another key.
//!
//! 4. **Best-effort snapshot**: the report reads keys one at a time.
//!    Calls racing shutdown may or may not be included.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use chiamate::recorder::Recorder;
//! use chiamate::reporter::Reporter;
//! use chiamate::record;
//!
//! let recorder = Arc::new(Recorder::new());
//! let reporter = Reporter::new(Arc::clone(&recorder), std::io::sink());
//!
//! record!(recorder, "Cart#add", 2, "apple");
//! record!(recorder, "Cart#add", 1, "pear");
//! record!(recorder, "Cart#checkout");
//!
//! assert_eq!(recorder.count("Cart#add"), 2);
//! assert!(reporter.render().contains("       2  Cart#add"));
//!
//! // at shutdown; later calls are no-ops
//! assert!(reporter.finish());
//! assert!(!reporter.finish());
//! ```
//!
//! ## Report format
//!
//! ```text
//! ===== Method Usage Summary =====
//!        2  Cart#add
//!           [2024-06-01T12:00:00.125+02:00] Cart#add([2, "apple"])
//!           [2024-06-01T12:00:00.250+02:00] Cart#add([1, "pear"])
//!        1  Cart#checkout
//!           [2024-06-01T12:00:00.375+02:00] Cart#checkout([])
//! ================================
//! ```
//!
//! Keys are ordered by descending count; equal counts are ordered by key.
//!
//! ## Observers
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | (always) | [`observers::text`] | The plain-text summary above |
//! | `table` | `observers::table` | Counts as a `tabled` table |
//! | `json` | `observers::json` | Snapshot serialized with serde |
//! | `full` | All observers | Enables all observer modules |
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (new keys and rendering fallbacks at
//! `debug`, report emission at `info`, sink failures at `warn`) and never
//! installs a subscriber itself.

pub mod config;
pub mod counters;
pub mod history;
pub mod key;
pub mod observers;
pub mod record;
pub mod recorder;
pub mod reporter;
pub mod snapshot;

pub use config::RecorderConfig;
pub use key::MethodKey;
pub use record::CallRecord;
pub use recorder::Recorder;
pub use reporter::{ReportGuard, Reporter};
pub use snapshot::{KeyUsage, UsageSnapshot};
