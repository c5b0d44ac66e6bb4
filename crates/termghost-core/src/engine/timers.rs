//! Delayed task queue on a logical clock.
//!
//! The queue never reads the wall clock. Callers move time forward with
//! [`TimerQueue::pop_due`], which lets tests step through the engine
//! deterministically and lets the TUI runtime feed in real elapsed time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Ties on deadline fire in scheduling order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            deadline: self.now + delay,
            seq,
            payload,
        }));
    }

    pub fn cancel_all(&mut self) {
        self.heap.clear();
    }

    /// Time remaining until the earliest timer.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.heap
            .peek()
            .map(|Reverse(e)| e.deadline.saturating_sub(self.now))
    }

    /// Pops the earliest timer due at or before `until`, moving the clock to
    /// its deadline. Returns `None` (and moves the clock to `until`) when
    /// nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let due = self
            .heap
            .peek()
            .is_some_and(|Reverse(e)| e.deadline <= until);
        if !due {
            self.now = self.now.max(until);
            return None;
        }
        let Reverse(entry) = self.heap.pop()?;
        self.now = self.now.max(entry.deadline);
        Some(entry.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(30), "c");
        q.schedule(ms(10), "a");
        q.schedule(ms(20), "b");

        let mut fired = Vec::new();
        while let Some(p) = q.pop_due(ms(100)) {
            fired.push(p);
        }

        assert_eq!(fired, vec!["a", "b", "c"]);
        assert_eq!(q.now(), ms(100));
    }

    #[test]
    fn test_clock_moves_to_each_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(ms(40), 1);

        assert_eq!(q.pop_due(ms(10)), None);
        assert_eq!(q.now(), ms(10));
        assert_eq!(q.next_due_in(), Some(ms(30)));

        assert_eq!(q.pop_due(ms(50)), Some(1));
        assert_eq!(q.now(), ms(40));

        // Rescheduling from inside a handler is relative to the firing time.
        q.schedule(ms(5), 2);
        assert_eq!(q.pop_due(ms(50)), Some(2));
        assert_eq!(q.now(), ms(45));
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), "first");
        q.schedule(ms(10), "second");

        assert_eq!(q.pop_due(ms(10)), Some("first"));
        assert_eq!(q.pop_due(ms(10)), Some("second"));
    }

    #[test]
    fn test_cancel_all_drops_everything() {
        let mut q = TimerQueue::new();
        q.schedule(ms(10), 1);
        q.schedule(ms(20), 2);
        q.cancel_all();

        assert_eq!(q.next_due_in(), None);
        assert_eq!(q.pop_due(ms(1000)), None);
    }
}
