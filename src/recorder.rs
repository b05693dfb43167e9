//! The concurrent usage registry.
//!
//! [`Recorder`] maps every observed [`MethodKey`] to its private state: one
//! sharded [`Unsigned`] counter and one [`HistoryBuffer`]. Per-key state is
//! created lazily on the first call for that key.
//!
//! # Concurrency
//!
//! - The registry is a sharded map. Looking up an existing key takes a
//!   shard read lock; installing a new key takes the shard write lock and is
//!   an atomic insert-if-absent, so racing first calls all converge on the
//!   same state.
//! - The shard lock is released before the call is counted and recorded.
//!   Counting is lock-free; recording only locks the key's own history.
//! - Calls on different keys never wait on each other's state.
//!
//! # Examples
//!
//! ```rust
//! use chiamate::recorder::Recorder;
//! use chiamate::record;
//!
//! let recorder = Recorder::new();
//! record!(recorder, "Cart#add", 3, "apple");
//! record!(recorder, "Cart#add", 1, "pear");
//! record!(recorder, "Cart#checkout");
//!
//! assert_eq!(recorder.count("Cart#add"), 2);
//! assert_eq!(recorder.count("Cart#remove"), 0);
//! assert_eq!(recorder.history("Cart#add")[1].args(), "[1, \"pear\"]");
//! ```

use std::fmt::{self, Debug};
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::RecorderConfig;
use crate::counters::unsigned::Unsigned;
use crate::history::HistoryBuffer;
use crate::key::MethodKey;
use crate::record::{render_args, CallRecord};
use crate::snapshot::{KeyUsage, UsageSnapshot};

/// State owned by a single key.
#[derive(Debug)]
struct KeyState {
    key: MethodKey,
    counter: Unsigned,
    history: HistoryBuffer,
}

/// Records invocation events and keeps per-key counts and recent history.
///
/// Build one at process start and share it (usually behind an [`Arc`]) with
/// whatever observes the calls. Reading it through [`Recorder::snapshot`]
/// never mutates it.
pub struct Recorder {
    config: RecorderConfig,
    registry: DashMap<MethodKey, Arc<KeyState>>,
}

impl Recorder {
    /// Creates a recorder with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RecorderConfig::default())
    }

    /// Creates a recorder with the given configuration.
    pub fn with_config(config: RecorderConfig) -> Self {
        let registry = match config.shard_count() {
            Some(shards) => DashMap::with_shard_amount(shards),
            None => DashMap::new(),
        };
        Self { config, registry }
    }

    /// The configuration the recorder was built with.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Records one call of `key` with the given arguments.
    ///
    /// Arguments are rendered with their `Debug` impl; an argument that
    /// fails to render is replaced by a placeholder and the call is still
    /// counted and retained. See also the [`record!`](crate::record!) macro.
    pub fn record(&self, key: impl AsRef<str>, args: &[&dyn Debug]) {
        let state = self.state_for(key.as_ref());
        state.counter.incr();
        let args = render_args(args);
        state
            .history
            .add(CallRecord::new(self.config.now(), state.key.clone(), args));
    }

    /// Records one call whose arguments were already rendered by the caller.
    pub fn record_rendered(&self, key: impl AsRef<str>, args: impl Into<String>) {
        let state = self.state_for(key.as_ref());
        state.counter.incr();
        state
            .history
            .add(CallRecord::new(self.config.now(), state.key.clone(), args));
    }

    /// Number of calls recorded for `key`; zero for keys never seen.
    pub fn count(&self, key: &str) -> u64 {
        self.registry
            .get(key)
            .map(|state| state.counter.value())
            .unwrap_or(0)
    }

    /// Retained calls of `key`, oldest first.
    pub fn history(&self, key: &str) -> Vec<CallRecord> {
        let state = self.registry.get(key).map(|entry| Arc::clone(entry.value()));
        state.map(|state| state.history.snapshot()).unwrap_or_default()
    }

    /// Returns `true` if `key` has been recorded at least once.
    pub fn contains_key(&self, key: &str) -> bool {
        self.registry.contains_key(key)
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Takes a best-effort snapshot of every key.
    ///
    /// Keys are read one at a time, so calls racing the snapshot may or may
    /// not be reflected. The result is sorted by descending count, ties by
    /// key.
    pub fn snapshot(&self) -> UsageSnapshot {
        // Clone the handles first so no registry shard stays locked while
        // histories are copied.
        let states: Vec<Arc<KeyState>> = self
            .registry
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let entries = states
            .iter()
            .map(|state| KeyUsage {
                key: state.key.clone(),
                count: state.counter.value(),
                history: state.history.snapshot(),
            })
            .filter(|usage| usage.count > 0)
            .collect();

        UsageSnapshot::new(self.config.now(), entries)
    }

    /// Resolves the state of `key`, installing it if this is the first call.
    fn state_for(&self, key: &str) -> Arc<KeyState> {
        if let Some(state) = self.registry.get(key) {
            return Arc::clone(state.value());
        }

        let key = MethodKey::from(key);
        let entry = self.registry.entry(key.clone()).or_insert_with(|| {
            tracing::debug!(key = %key, "tracking new method");
            Arc::new(KeyState {
                key: key.clone(),
                counter: Unsigned::new(),
                history: HistoryBuffer::new(self.config.capacity()),
            })
        });
        Arc::clone(entry.value())
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("keys", &self.registry.len())
            .field("history_capacity", &self.config.capacity())
            .finish()
    }
}

/// Records a call on a [`Recorder`] with any number of `Debug` arguments.
///
/// ```rust
/// use chiamate::recorder::Recorder;
/// use chiamate::record;
///
/// let recorder = Recorder::new();
/// record!(recorder, "Auth#login", "alice", 42u8);
/// assert_eq!(recorder.history("Auth#login")[0].args(), "[\"alice\", 42]");
/// ```
#[macro_export]
macro_rules! record {
    ($recorder:expr, $key:expr $(, $arg:expr)* $(,)?) => {
        $recorder.record($key, &[$(&$arg as &dyn ::std::fmt::Debug),*])
    };
}
