//! Snapshot-based undo/redo.

use super::feature::{PolygonFeature, PolygonGroup};
use std::collections::VecDeque;
use std::sync::Arc;

/// An immutable capture of the feature and group collections.
///
/// Collections are shared with the live editor state until one side writes,
/// so taking a snapshot never copies features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub(crate) features: Arc<Vec<PolygonFeature>>,
    pub(crate) groups: Arc<Vec<PolygonGroup>>,
}

impl Snapshot {
    pub fn features(&self) -> &[PolygonFeature] {
        &self.features
    }

    pub fn groups(&self) -> &[PolygonGroup] {
        &self.groups
    }
}

/// Linear undo/redo stacks.
///
/// Recording a new step discards the redo stack. With a limit set, the
/// oldest undo step is dropped once the past stack grows beyond it.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: VecDeque<Snapshot>,
    future: Vec<Snapshot>,
    limit: Option<usize>,
}

impl History {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit,
        }
    }

    /// Records the state as it was before a structural change.
    pub fn record(&mut self, before: Snapshot) {
        self.past.push_back(before);
        self.future.clear();
        self.enforce_limit();
    }

    /// Steps back. `current` goes to the redo stack; the restored state is
    /// returned. `None` (and no change) when there is nothing to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Steps forward again. Mirror of [`History::undo`].
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.future.pop()?;
        self.past.push_back(current);
        self.enforce_limit();
        Some(next)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    fn enforce_limit(&mut self) {
        if let Some(limit) = self.limit {
            while self.past.len() > limit {
                self.past.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::GroupId;

    fn snap(tag: &str) -> Snapshot {
        Snapshot {
            features: Arc::new(Vec::new()),
            groups: Arc::new(vec![PolygonGroup::new(GroupId::from(tag), tag)]),
        }
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut history = History::new(None);
        history.record(snap("a"));

        let restored = history.undo(snap("b")).unwrap();
        assert_eq!(restored, snap("a"));
        assert!(history.can_redo());

        let again = history.redo(restored).unwrap();
        assert_eq!(again, snap("b"));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_empty_is_none() {
        let mut history = History::new(None);
        assert!(history.undo(snap("a")).is_none());
        assert!(history.redo(snap("a")).is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_future() {
        let mut history = History::new(None);
        history.record(snap("a"));
        history.undo(snap("b"));
        history.record(snap("a"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(Some(2));
        history.record(snap("a"));
        history.record(snap("b"));
        history.record(snap("c"));
        assert_eq!(history.undo_depth(), 2);

        assert_eq!(history.undo(snap("d")), Some(snap("c")));
        assert_eq!(history.undo(snap("c")), Some(snap("b")));
        assert_eq!(history.undo(snap("b")), None);
    }
}
