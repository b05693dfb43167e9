//! Monotonic call counter with sharded atomic storage.
//!
//! [`Unsigned`] is the counter stored for every method key. It only ever
//! grows: the sole mutating operations are [`Unsigned::incr`] and
//! [`Unsigned::add`].

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use std::fmt::Debug;

use crate::counters::{GetComponentCounter, NUM_COMPONENTS, THREAD_SLOT_INDEX};

/// A sharded, increment-only counter.
///
/// Updates from different threads land on different cache lines, so a
/// method called from every worker in the process does not serialize those
/// workers on a single atomic.
///
/// # Examples
///
/// ```rust
/// use chiamate::counters::unsigned::Unsigned;
/// use std::sync::Arc;
/// use std::thread;
///
/// let counter = Arc::new(Unsigned::new());
/// let mut handles = vec![];
///
/// for _ in 0..4 {
///     let c = Arc::clone(&counter);
///     handles.push(thread::spawn(move || {
///         for _ in 0..1000 {
///             c.incr();
///         }
///     }));
/// }
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(counter.value(), 4000);
/// ```
pub struct Unsigned {
    components: [CachePadded<AtomicUsize>; NUM_COMPONENTS],
}

impl GetComponentCounter for Unsigned {
    type CounterType = AtomicUsize;

    #[inline]
    fn get_component_counter(&self) -> &AtomicUsize {
        THREAD_SLOT_INDEX.with(|idx| &self.components[*idx])
    }
}

impl Unsigned {
    /// Creates a new counter initialized to zero.
    pub const fn new() -> Self {
        const ZERO: CachePadded<AtomicUsize> = CachePadded::new(AtomicUsize::new(0));
        Unsigned {
            components: [ZERO; NUM_COMPONENTS],
        }
    }

    /// Counts one call.
    #[inline]
    pub fn incr(&self) {
        self.add(1);
    }

    /// Adds `value` calls to the counter.
    ///
    /// Lock-free; each thread updates its own shard.
    #[inline]
    pub fn add(&self, value: usize) {
        self.get_component_counter()
            .fetch_add(value, Ordering::Relaxed);
    }

    /// Returns the contribution of the current thread's shard.
    #[inline]
    pub fn local_value(&self) -> usize {
        self.get_component_counter().load(Ordering::Relaxed)
    }

    /// Returns the total by summing all shards.
    ///
    /// Not linearized against concurrent `incr` calls: an increment racing
    /// the read may or may not be included.
    #[inline]
    pub fn value(&self) -> u64 {
        self.components
            .iter()
            .map(|counter| counter.load(Ordering::Relaxed) as u64)
            .sum()
    }
}

impl Default for Unsigned {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Unsigned {
    /// Formats the counter showing non-zero shards: `{ [slot]:value ... }`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, counter) in self.components.iter().enumerate() {
            let val = counter.load(Ordering::Relaxed);
            if val != 0 {
                write!(f, " [{i}]:{val}")?;
            }
        }
        write!(f, " }}")
    }
}
