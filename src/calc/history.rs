//! Linear undo/redo history of engine snapshots.
//!
//! Every mutating input pushes the state it replaced onto the undo stack
//! and drops the redo stack; there is no branching history.

use std::collections::VecDeque;
use thiserror::Error;
use tracing::trace;

/// Undo and redo stacks of full state snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    /// Most recent snapshot at the back.
    undo: VecDeque<S>,
    /// Most recent snapshot at the end.
    redo: Vec<S>,
    /// Maximum undo depth; `None` is unbounded.
    limit: Option<usize>,
}

impl<S> HistoryManager<S> {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// Create an empty history that keeps at most `limit` undo snapshots.
    ///
    /// Once the limit is reached the oldest snapshot is discarded.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit,
        }
    }

    /// Record the state about to be replaced by a mutating input.
    pub fn record(&mut self, before: S) {
        if self.limit == Some(0) {
            self.redo.clear();
            return;
        }
        self.undo.push_back(before);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
        self.redo.clear();
        trace!(undo = self.undo.len(), "recorded snapshot");
    }

    /// Step back: `current` is swapped with the latest undo snapshot and
    /// the replaced state goes to the redo stack.
    pub fn undo(&mut self, current: &mut S) -> Result<(), HistoryError> {
        let previous = self.undo.pop_back().ok_or(HistoryError::NothingToUndo)?;
        self.redo.push(std::mem::replace(current, previous));
        trace!(undo = self.undo.len(), redo = self.redo.len(), "undo");
        Ok(())
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &mut S) -> Result<(), HistoryError> {
        let next = self.redo.pop().ok_or(HistoryError::NothingToRedo)?;
        self.undo.push_back(std::mem::replace(current, next));
        trace!(undo = self.undo.len(), redo = self.redo.len(), "redo");
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of snapshots available to undo.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of snapshots available to redo.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

impl<S> Default for HistoryManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from stepping through history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let mut history: HistoryManager<i32> = HistoryManager::new();
        let mut current = 0;
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(&mut current), Err(HistoryError::NothingToUndo));
        assert_eq!(history.redo(&mut current), Err(HistoryError::NothingToRedo));
        assert_eq!(current, 0);
    }

    #[test]
    fn test_undo_redo_swap() {
        let mut history = HistoryManager::new();
        let mut current = 0;

        history.record(current);
        current = 1;
        history.record(current);
        current = 2;

        history.undo(&mut current).unwrap();
        assert_eq!(current, 1);
        history.undo(&mut current).unwrap();
        assert_eq!(current, 0);
        assert!(!history.can_undo());

        history.redo(&mut current).unwrap();
        assert_eq!(current, 1);
        history.redo(&mut current).unwrap();
        assert_eq!(current, 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = HistoryManager::new();
        let mut current = 'a';
        history.record(current);
        current = 'b';
        history.undo(&mut current).unwrap();
        assert!(history.can_redo());

        history.record(current);
        assert!(!history.can_redo());
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = HistoryManager::with_limit(Some(2));
        for v in 0..5 {
            history.record(v);
        }
        assert_eq!(history.undo_len(), 2);

        let mut current = 5;
        history.undo(&mut current).unwrap();
        assert_eq!(current, 4);
        history.undo(&mut current).unwrap();
        assert_eq!(current, 3);
        assert_eq!(history.undo(&mut current), Err(HistoryError::NothingToUndo));
    }

    #[test]
    fn test_zero_limit_disables_undo() {
        let mut history = HistoryManager::with_limit(Some(0));
        history.record(1);
        assert!(!history.can_undo());
    }
}
