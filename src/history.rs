//! Bounded undo history of full color-list snapshots.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Undo depth used when none is configured.
pub const DEFAULT_HISTORY_LENGTH: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Undo stack holding at most `capacity` snapshots.
///
/// Eviction is by insertion order: once full, each push discards the oldest
/// snapshot.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: VecDeque<Vec<String>>,
    capacity: NonZeroUsize,
}

impl HistoryStack {
    /// Storage grows with pushes; `capacity` only bounds it.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            capacity,
        }
    }

    /// Store an owned copy of `list` as the newest snapshot.
    pub fn push_snapshot(&mut self, list: &[String]) {
        self.snapshots.push_back(list.to_vec());
        while self.snapshots.len() > self.capacity.get() {
            self.snapshots.pop_front();
        }
    }

    /// Remove and return the newest snapshot.
    pub fn pop_snapshot(&mut self) -> Option<Vec<String>> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.snapshots.iter().map(Vec::as_slice)
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tag: &str) -> Vec<String> {
        vec![tag.to_string()]
    }

    fn stack(capacity: usize) -> HistoryStack {
        HistoryStack::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn pop_returns_newest_first() {
        let mut history = stack(3);
        history.push_snapshot(&snap("a"));
        history.push_snapshot(&snap("b"));
        assert_eq!(history.pop_snapshot(), Some(snap("b")));
        assert_eq!(history.pop_snapshot(), Some(snap("a")));
        assert_eq!(history.pop_snapshot(), None);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut history = stack(2);
        for tag in ["a", "b", "c"] {
            history.push_snapshot(&snap(tag));
        }
        assert_eq!(history.len(), 2);
        let kept: Vec<_> = history.iter().map(|s| s[0].clone()).collect();
        assert_eq!(kept, ["b", "c"]);
    }

    #[test]
    fn snapshots_are_independent_copies() {
        let mut history = stack(2);
        let mut live = snap("a");
        history.push_snapshot(&live);
        live[0] = "mutated".to_string();
        assert_eq!(history.pop_snapshot(), Some(snap("a")));
    }

    #[test]
    fn huge_capacity_is_not_preallocated() {
        let mut history = HistoryStack::new(NonZeroUsize::MAX);
        history.push_snapshot(&snap("a"));
        history.push_snapshot(&snap("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.capacity(), usize::MAX);
    }

    #[test]
    fn default_depth_is_ten() {
        let history = HistoryStack::default();
        assert_eq!(history.capacity(), 10);
        assert!(history.is_empty());
    }
}
