//! The ordered working set of not-yet-decided entries.

use super::{criterion_cmp, sort_entries, Entry, SortCriterion};
use std::cmp::Ordering;

/// Ordered sequence of entries; the front is the one on screen.
///
/// The queue is only ever mutated by a full replace (directory load), the
/// removal of the front entry (a decision), or the sorted reinsertion of an
/// entry whose disposition failed. Outside an in-flight disposition the
/// order always matches the active criterion.
#[derive(Debug)]
pub struct ReviewQueue {
    entries: Vec<Entry>,
    criterion: SortCriterion,
}

impl ReviewQueue {
    pub fn new(criterion: SortCriterion) -> Self {
        Self {
            entries: Vec::new(),
            criterion,
        }
    }

    /// Replaces the whole queue with a fresh listing, sorted.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        sort_entries(&mut self.entries, self.criterion);
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn criterion(&self) -> SortCriterion {
        self.criterion
    }

    /// Changes the order; re-sorts the remaining entries.
    pub fn set_criterion(&mut self, criterion: SortCriterion) {
        self.criterion = criterion;
        sort_entries(&mut self.entries, criterion);
    }

    /// The entry currently under review.
    pub fn front(&self) -> Option<&Entry> {
        self.entries.first()
    }

    /// Removes and returns the front entry.
    pub fn take_front(&mut self) -> Option<Entry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Puts an entry back at the position the active criterion dictates,
    /// after any entries that compare equal to it.
    pub fn reinsert(&mut self, entry: Entry) {
        let at = self
            .entries
            .partition_point(|e| criterion_cmp(e, &entry, self.criterion) != Ordering::Greater);
        self.entries.insert(at, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FileKind;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn entry(name: &str, size: u64, modified_secs: i64) -> Entry {
        Entry {
            path: PathBuf::from(format!("/queue/{}", name)),
            name: name.to_string(),
            is_dir: false,
            size,
            modified: Utc.timestamp_opt(modified_secs, 0).unwrap(),
            kind: FileKind::None,
        }
    }

    fn names(queue: &ReviewQueue) -> Vec<String> {
        queue.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_new_queue_is_empty() {
        let queue = ReviewQueue::new(SortCriterion::Name);
        assert!(queue.is_empty());
        assert!(queue.front().is_none());
    }

    #[test]
    fn test_replace_sorts_by_criterion() {
        let mut queue = ReviewQueue::new(SortCriterion::Name);
        queue.replace(vec![entry("c", 1, 1), entry("a", 1, 1), entry("b", 1, 1)]);

        assert_eq!(names(&queue), vec!["a", "b", "c"]);
        assert_eq!(queue.front().unwrap().name, "a");
    }

    #[test]
    fn test_take_front_advances() {
        let mut queue = ReviewQueue::new(SortCriterion::Name);
        queue.replace(vec![entry("a", 1, 1), entry("b", 1, 1)]);

        let taken = queue.take_front().unwrap();
        assert_eq!(taken.name, "a");
        assert_eq!(queue.front().unwrap().name, "b");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_set_criterion_resorts() {
        let mut queue = ReviewQueue::new(SortCriterion::Name);
        queue.replace(vec![entry("a", 10, 1), entry("b", 3000, 2), entry("c", 500, 3)]);

        queue.set_criterion(SortCriterion::LargestFirst);
        assert_eq!(names(&queue), vec!["b", "c", "a"]);

        queue.set_criterion(SortCriterion::OldestFirst);
        assert_eq!(names(&queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reinsert_at_sorted_position() {
        let mut queue = ReviewQueue::new(SortCriterion::Name);
        queue.replace(vec![entry("a", 1, 1), entry("c", 1, 1), entry("d", 1, 1)]);

        queue.reinsert(entry("b", 1, 1));
        assert_eq!(names(&queue), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_reinsert_front_restores_it() {
        let mut queue = ReviewQueue::new(SortCriterion::OldestFirst);
        queue.replace(vec![entry("old", 1, 100), entry("mid", 1, 200), entry("new", 1, 300)]);

        let taken = queue.take_front().unwrap();
        assert_eq!(names(&queue), vec!["mid", "new"]);

        queue.reinsert(taken);
        assert_eq!(names(&queue), vec!["old", "mid", "new"]);
        assert_eq!(queue.front().unwrap().name, "old");
    }

    #[test]
    fn test_reinsert_after_equal_keys() {
        let mut queue = ReviewQueue::new(SortCriterion::LargestFirst);
        queue.replace(vec![entry("x", 100, 1), entry("y", 100, 1)]);

        queue.reinsert(entry("z", 100, 1));
        // Equal sizes keep their relative order; the reinserted entry goes last.
        assert_eq!(names(&queue), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_reinsert_leaves_other_entries_untouched() {
        let mut queue = ReviewQueue::new(SortCriterion::Name);
        queue.replace(vec![entry("a", 1, 1), entry("b", 1, 1), entry("c", 1, 1)]);

        let taken = queue.take_front().unwrap();
        let before: Vec<_> = names(&queue);
        queue.reinsert(taken);

        assert_eq!(names(&queue)[1..], before[..]);
    }

    #[test]
    fn test_clear_empties_queue() {
        let mut queue = ReviewQueue::new(SortCriterion::Name);
        queue.replace(vec![entry("a", 1, 1)]);
        queue.clear();
        assert!(queue.is_empty());
    }
}
