//! Bounded per-key call history.
//!
//! [`HistoryBuffer`] keeps the most recent `capacity` [`CallRecord`]s of one
//! key in a circular array. Once full, every insert overwrites the oldest
//! record.
//!
//! ```text
//!   capacity = 4, after adding r1..r6
//!
//!   Index:     0     1     2     3
//!            ┌─────┬─────┬─────┬─────┐
//!   slots:   │ r5  │ r6  │ r3  │ r4  │
//!            └─────┴─────┴─────┴─────┘
//!                        ▲
//!                     cursor = 2 (next write), len = 4
//!
//!   start    = (cursor + capacity - len) % capacity = 2
//!   snapshot = slots[2], slots[3], slots[0], slots[1] = r3, r4, r5, r6
//! ```
//!
//! Each buffer has its own lock, so adding to one key's history never waits
//! on another key.

use parking_lot::Mutex;

use crate::record::CallRecord;

/// Fixed-capacity, thread-safe ring of recent call records.
///
/// # Examples
///
/// ```rust
/// use chiamate::history::HistoryBuffer;
/// use chiamate::key::MethodKey;
/// use chiamate::record::CallRecord;
/// use chrono::Local;
///
/// let history = HistoryBuffer::new(2);
/// let key = MethodKey::from("Cart#add");
/// for tag in ["[1]", "[2]", "[3]"] {
///     history.add(CallRecord::new(Local::now().fixed_offset(), key.clone(), tag));
/// }
///
/// let args: Vec<_> = history.snapshot().iter().map(|r| r.args().to_string()).collect();
/// assert_eq!(args, vec!["[2]", "[3]"]);
/// ```
#[derive(Debug)]
pub struct HistoryBuffer {
    capacity: usize,
    ring: Mutex<Ring>,
}

#[derive(Debug)]
struct Ring {
    slots: Vec<Option<CallRecord>>,
    cursor: usize,
    len: usize,
}

impl HistoryBuffer {
    /// Creates an empty buffer. A `capacity` of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            ring: Mutex::new(Ring {
                slots: Vec::new(),
                cursor: 0,
                len: 0,
            }),
        }
    }

    /// Maximum number of records retained.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records currently retained.
    pub fn len(&self) -> usize {
        self.ring.lock().len
    }

    /// Returns `true` if nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a record, evicting the oldest one when the buffer is full.
    pub fn add(&self, record: CallRecord) {
        let mut ring = self.ring.lock();
        let cursor = ring.cursor;
        // Slots are allocated on demand so that rarely called keys do not
        // pay for the full capacity up front.
        if cursor == ring.slots.len() {
            ring.slots.push(Some(record));
        } else {
            ring.slots[cursor] = Some(record);
        }
        ring.cursor = (cursor + 1) % self.capacity;
        if ring.len < self.capacity {
            ring.len += 1;
        }
    }

    /// Returns the retained records, oldest first.
    ///
    /// The copy is taken under the buffer lock, so it never observes a
    /// half-applied `add`.
    pub fn snapshot(&self) -> Vec<CallRecord> {
        let ring = self.ring.lock();
        let start = (ring.cursor + self.capacity - ring.len) % self.capacity;
        (0..ring.len)
            .filter_map(|k| ring.slots[(start + k) % self.capacity].clone())
            .collect()
    }

    /// Returns the newest record, if any.
    pub fn most_recent(&self) -> Option<CallRecord> {
        let ring = self.ring.lock();
        if ring.len == 0 {
            return None;
        }
        let last = (ring.cursor + self.capacity - 1) % self.capacity;
        ring.slots[last].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::MethodKey;
    use chrono::DateTime;
    use std::sync::Arc;
    use std::thread;

    fn record(tag: usize) -> CallRecord {
        let ts = DateTime::parse_from_rfc3339("2024-01-01T00:00:00+00:00").unwrap();
        CallRecord::new(ts, MethodKey::from("A#run"), format!("[{tag}]"))
    }

    fn tags(records: &[CallRecord]) -> Vec<String> {
        records.iter().map(|r| r.args().to_string()).collect()
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let history = HistoryBuffer::new(0);
        assert_eq!(history.capacity(), 1);
        history.add(record(1));
        history.add(record(2));
        assert_eq!(tags(&history.snapshot()), vec!["[2]"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let history = HistoryBuffer::new(3);
        assert!(history.is_empty());
        assert!(history.snapshot().is_empty());
        assert!(history.most_recent().is_none());
    }

    #[test]
    fn test_partial_fill_keeps_all_in_order() {
        let history = HistoryBuffer::new(5);
        for tag in 1..=3 {
            history.add(record(tag));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(tags(&history.snapshot()), vec!["[1]", "[2]", "[3]"]);
    }

    #[test]
    fn test_overflow_keeps_last_capacity() {
        let history = HistoryBuffer::new(3);
        for tag in 1..=5 {
            history.add(record(tag));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(tags(&history.snapshot()), vec!["[3]", "[4]", "[5]"]);
        assert_eq!(history.most_recent().unwrap().args(), "[5]");
    }

    #[test]
    fn test_exact_fill_and_many_wraps() {
        let history = HistoryBuffer::new(4);
        for tag in 1..=4 {
            history.add(record(tag));
        }
        assert_eq!(tags(&history.snapshot()), vec!["[1]", "[2]", "[3]", "[4]"]);

        for tag in 5..=103 {
            history.add(record(tag));
        }
        assert_eq!(tags(&history.snapshot()), vec!["[100]", "[101]", "[102]", "[103]"]);
    }

    #[test]
    fn test_concurrent_adds_never_tear() {
        let history = Arc::new(HistoryBuffer::new(16));
        let mut handles = vec![];

        for t in 0..4 {
            let history = Arc::clone(&history);
            handles.push(thread::spawn(move || {
                for i in 0..500 {
                    history.add(record(t * 1000 + i));
                    let snap = history.snapshot();
                    assert!(snap.len() <= 16);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let snap = history.snapshot();
        assert_eq!(snap.len(), 16);

        // Per writer, the retained records keep their insertion order.
        for t in 0..4 {
            let mine: Vec<usize> = snap
                .iter()
                .map(|r| r.args().trim_matches(|c| c == '[' || c == ']').parse().unwrap())
                .filter(|v: &usize| v / 1000 == t)
                .collect();
            assert!(mine.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
