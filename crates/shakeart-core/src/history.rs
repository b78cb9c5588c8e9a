//! Undo/redo history of full stroke-collection snapshots.

use crate::stroke::Stroke;

/// An immutable copy of the stroke collection at a point in time.
pub type Snapshot = Vec<Stroke>;

/// Undo and redo stacks (most recent last).
///
/// Unbounded unless created with [`History::with_limit`].
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` undo snapshots, dropping the oldest first.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Push current state to undo stack (call before making changes).
    pub fn record_before_mutation(&mut self, current: &[Stroke]) {
        self.push_undo(current.to_vec());
        // A new change abandons the redo branch
        self.redo_stack.clear();
    }

    /// Undo the last change by swapping `current` with the top undo snapshot.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self, current: &mut Snapshot) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let previous = std::mem::replace(current, snapshot);
        self.redo_stack.push(previous);
        true
    }

    /// Redo the last undone change by swapping `current` with the top redo snapshot.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self, current: &mut Snapshot) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let previous = std::mem::replace(current, snapshot);
        self.push_undo(previous);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop both stacks.
    pub fn reset(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);
        if let Some(limit) = self.limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            if excess > 0 {
                self.undo_stack.drain(..excess);
            }
        }
    }
}
