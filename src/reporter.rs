//! Exactly-once shutdown report.
//!
//! A [`Reporter`] owns the output sink and emits the usage summary of a
//! [`Recorder`] at most once, however many times [`Reporter::finish`] is
//! triggered. Failures of the sink are logged and swallowed so that a closed
//! stdout never turns process exit into a crash.
//!
//! The host decides when shutdown happens. The simplest wiring is a
//! [`ReportGuard`] kept alive for the whole of `main`:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chiamate::recorder::Recorder;
//! use chiamate::reporter::Reporter;
//!
//! fn main() {
//!     let recorder = Arc::new(Recorder::new());
//!     let _report = Reporter::stdout(Arc::clone(&recorder)).guard();
//!
//!     recorder.record("App#run", &[]);
//!     // the summary is printed when `_report` is dropped
//! }
//! ```

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observers::text::TextObserver;
use crate::observers::Result;
use crate::recorder::Recorder;

/// Emits the usage summary of a recorder, once.
pub struct Reporter {
    recorder: Arc<Recorder>,
    observer: TextObserver,
    sink: Mutex<Box<dyn Write + Send>>,
    finished: AtomicBool,
}

impl Reporter {
    /// Creates a reporter writing to `sink`.
    pub fn new(recorder: Arc<Recorder>, sink: impl Write + Send + 'static) -> Self {
        Self {
            recorder,
            observer: TextObserver::new(),
            sink: Mutex::new(Box::new(sink)),
            finished: AtomicBool::new(false),
        }
    }

    /// Creates a reporter writing to standard output.
    pub fn stdout(recorder: Arc<Recorder>) -> Self {
        Self::new(recorder, io::stdout())
    }

    /// Replaces the text layout.
    pub fn with_observer(mut self, observer: TextObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Wraps the reporter in a guard that finishes it on drop.
    pub fn guard(self) -> ReportGuard {
        ReportGuard { reporter: self }
    }

    /// Returns `true` once the report has been emitted (or attempted).
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Renders the current report without emitting it.
    ///
    /// Reading never mutates the recorder, so this can be called any number
    /// of times and does not consume the single emission.
    pub fn render(&self) -> String {
        self.observer.render(&self.recorder.snapshot())
    }

    /// Emits the report if it has not been emitted yet.
    ///
    /// Returns `true` if this call emitted it. Sink errors are logged and
    /// the call still counts as the single emission.
    pub fn finish(&self) -> bool {
        if self.finished.swap(true, Ordering::AcqRel) {
            tracing::debug!("usage summary already emitted, skipping");
            return false;
        }

        let snapshot = self.recorder.snapshot();
        match self.emit(&snapshot) {
            Ok(()) => tracing::info!(
                keys = snapshot.len(),
                calls = snapshot.total_calls(),
                "usage summary emitted"
            ),
            Err(err) => tracing::warn!(error = %err, "failed to write usage summary"),
        }
        true
    }

    fn emit(&self, snapshot: &crate::snapshot::UsageSnapshot) -> Result<()> {
        let mut sink = self.sink.lock();
        self.observer.write_to(snapshot, &mut **sink)
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("recorder", &self.recorder)
            .field("observer", &self.observer)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Finishes its [`Reporter`] when dropped.
///
/// Keep it alive for as long as the process should record; dropping it is
/// the finalization phase.
#[derive(Debug)]
pub struct ReportGuard {
    reporter: Reporter,
}

impl ReportGuard {
    /// The guarded reporter.
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Emits the report now instead of on drop.
    pub fn finish(&self) -> bool {
        self.reporter.finish()
    }
}

impl Drop for ReportGuard {
    fn drop(&mut self) {
        self.reporter.finish();
    }
}
