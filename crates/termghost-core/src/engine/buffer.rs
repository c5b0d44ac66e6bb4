//! Bounded, append-only window of log records.

use std::collections::VecDeque;

use super::line::{LineId, LogRecord};

/// Maximum number of records kept on screen.
pub const MAX_LINES: usize = 500;

/// Sliding window of records, oldest first.
///
/// Records are only ever appended at the back and evicted from the front,
/// so ids stay sorted and lookups can binary search.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    records: VecDeque<LogRecord>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(MAX_LINES)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends records, evicting the oldest beyond capacity.
    pub fn append(&mut self, records: impl IntoIterator<Item = LogRecord>) {
        self.records.extend(records);
        let excess = self.records.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.records.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn position(&self, id: LineId) -> Option<usize> {
        self.records.binary_search_by_key(&id, |r| r.id).ok()
    }

    pub fn get(&self, id: LineId) -> Option<&LogRecord> {
        self.position(id).map(|idx| &self.records[idx])
    }

    /// Updates the progress of one record. Evicted ids are ignored.
    pub fn patch_progress(&mut self, id: LineId, value: u8) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.records[idx].progress = Some(value.min(100));
                true
            }
            None => false,
        }
    }

    /// Applies a set of progress updates as one publish.
    pub fn patch_many(&mut self, updates: &[(LineId, u8)]) -> usize {
        updates
            .iter()
            .filter(|(id, value)| self.patch_progress(*id, *value))
            .count()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// Records with ids greater than `id`, in display order.
    pub fn since(&self, id: Option<LineId>) -> impl Iterator<Item = &LogRecord> {
        let start = match id {
            Some(id) => self.records.partition_point(|r| r.id <= id),
            None => 0,
        };
        self.records.range(start..)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::engine::line::{Category, LineFactory, LineOptions};

    fn records(factory: &mut LineFactory, n: usize) -> Vec<LogRecord> {
        (0..n)
            .map(|i| {
                factory.create_with(format!("line {i}"), Category::Default, LineOptions::default())
            })
            .collect()
    }

    #[test]
    fn test_append_keeps_order() {
        let mut factory = LineFactory::new();
        let mut buffer = LogBuffer::new();
        buffer.append(records(&mut factory, 3));

        let contents: Vec<_> = buffer.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["line 0", "line 1", "line 2"]);
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut factory = LineFactory::new();
        let mut buffer = LogBuffer::new();
        let all = records(&mut factory, MAX_LINES + 20);
        buffer.append(all.clone());

        assert_eq!(buffer.len(), MAX_LINES);
        let kept: Vec<_> = buffer.iter().cloned().collect();
        assert_eq!(kept, all[20..].to_vec());
    }

    #[test]
    fn test_patch_progress_only_touches_progress() {
        let mut factory = LineFactory::new();
        let mut buffer = LogBuffer::new();
        let line = factory.create_with(
            "Downloading numpy...",
            Category::Dim,
            LineOptions::default().progress(40.0),
        );
        let id = line.id;
        buffer.append(records(&mut factory, 2));
        buffer.append([line.clone()]);

        assert!(buffer.patch_progress(id, 75));

        let patched = buffer.get(id).unwrap();
        assert_eq!(patched.progress, Some(75));
        assert_eq!(patched.content, line.content);
        assert_eq!(buffer.iter().position(|r| r.id == id), Some(2));
    }

    #[test]
    fn test_patch_evicted_id_is_noop() {
        let mut factory = LineFactory::new();
        let mut buffer = LogBuffer::with_capacity(2);
        let first = factory.create_with("bar", Category::Dim, LineOptions::default().progress(0.0));
        let first_id = first.id;
        buffer.append([first]);
        buffer.append(records(&mut factory, 2));

        assert!(!buffer.patch_progress(first_id, 50));
        assert_eq!(buffer.patch_many(&[(first_id, 10)]), 0);
    }

    #[test]
    fn test_clear_then_since() {
        let mut factory = LineFactory::new();
        let mut buffer = LogBuffer::new();
        buffer.append(records(&mut factory, 10));
        let mark = buffer.iter().nth(6).map(|r| r.id);

        assert_eq!(buffer.since(mark).count(), 3);
        assert_eq!(buffer.since(None).count(), 10);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    proptest! {
        #[test]
        fn prop_buffer_never_exceeds_capacity(sizes in proptest::collection::vec(0usize..200, 0..20)) {
            let mut factory = LineFactory::new();
            let mut buffer = LogBuffer::new();
            let mut all = Vec::new();
            for n in sizes {
                let batch = records(&mut factory, n);
                all.extend(batch.clone());
                buffer.append(batch);
                prop_assert!(buffer.len() <= MAX_LINES);
            }
            let start = all.len().saturating_sub(MAX_LINES);
            let kept: Vec<_> = buffer.iter().cloned().collect();
            prop_assert_eq!(kept, all[start..].to_vec());
        }

        #[test]
        fn prop_ids_pairwise_distinct(n in 1usize..2000) {
            let mut factory = LineFactory::new();
            let mut ids: Vec<_> = records(&mut factory, n).into_iter().map(|r| r.id).collect();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), n);
        }
    }
}
