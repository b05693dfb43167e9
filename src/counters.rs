//! Per-key call counters and the sharding infrastructure behind them.
//!
//! Every distinct method key owns exactly one counter. Counters are bumped
//! on every recorded invocation, from any thread, so they are sharded to keep
//! hot methods from turning into a cache-line ping-pong between cores.
//!
//! # Architecture
//!
//! 1. A global atomic counter (`NEXT_SLOT_ID`) assigns sequential IDs to threads
//! 2. Each thread stores its assigned slot index in thread-local storage
//! 3. The slot index is used modulo `NUM_COMPONENTS` (64) to select which
//!    shard a thread writes to
//! 4. Each shard is cache-line padded to prevent false sharing
//!
//! ```text
//!                          ┌─────────────────────────────────────┐
//!                          │       Counter for "Cart#checkout"   │
//!                          ├─────────────────────────────────────┤
//!   Thread 0 ──incr───►    │ [Slot 0] ████████ (CachePadded)     │
//!   Thread 1 ──incr───►    │ [Slot 1] ████████ (CachePadded)     │
//!        ...               │    ...                              │
//!   Thread 63 ─incr───►    │ [Slot 63] ███████ (CachePadded)     │
//!                          └─────────────────────────────────────┘
//!                                          │
//!                                          ▼
//!                                   value() sums all
//!                                   slots on read
//! ```
//!
//! Counters are never decremented and never reset: the value read at report
//! time is the exact number of increments applied so far.

pub mod unsigned;

use atomic_traits::Atomic;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of shards (slots) used by each counter.
///
/// Each slot is cache-line padded (64 bytes), so a counter costs about 4KB.
pub(crate) const NUM_COMPONENTS: usize = 64;

static NEXT_SLOT_ID: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    /// Slot index of the current thread, assigned lazily on first use.
    pub(crate) static THREAD_SLOT_INDEX: usize = get_next_slot_id();
}

/// Assigns the next available slot ID to a thread.
///
/// The returned value is in the range `[0, NUM_COMPONENTS)`. Two threads
/// sharing a slot only costs contention, never correctness.
pub fn get_next_slot_id() -> usize {
    NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed) % NUM_COMPONENTS
}

/// Access to the shard owned by the calling thread.
pub trait GetComponentCounter {
    /// The atomic type used for individual shards.
    type CounterType: Atomic;

    /// Returns a reference to the current thread's shard.
    fn get_component_counter(&self) -> &Self::CounterType;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_ids_are_in_range() {
        for _ in 0..(NUM_COMPONENTS * 2) {
            assert!(get_next_slot_id() < NUM_COMPONENTS);
        }
    }

    #[test]
    fn test_thread_slot_is_stable() {
        let first = THREAD_SLOT_INDEX.with(|idx| *idx);
        let second = THREAD_SLOT_INDEX.with(|idx| *idx);
        assert_eq!(first, second);
    }
}
