// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Undo/redo history of project snapshots.

/// Bounded undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Undo stack (past states)
    undo_stack: Vec<T>,
    /// Redo stack (future states after undo)
    redo_stack: Vec<T>,
    /// Maximum history size
    max_size: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}

impl<T> History<T> {
    /// Keep the last 50 states unless told otherwise.
    pub const DEFAULT_SIZE: usize = 50;

    pub fn new(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size: max_size.max(1),
        }
    }

    /// Save the state that is about to be replaced.
    pub fn push(&mut self, previous: T) {
        self.undo_stack.push(previous);
        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        // A new change invalidates anything that was undone
        self.redo_stack.clear();
    }

    /// Restore the previous state, parking `current` for redo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        Some(previous)
    }

    /// Restore the next state, parking `current` for undo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::History;

    #[test]
    fn test_undo_redo_flow() {
        let mut history = History::default();
        history.push(1);
        history.push(2);

        assert_eq!(history.undo(3), Some(2));
        assert_eq!(history.undo(2), Some(1));
        assert_eq!(history.undo(1), None);
        assert!(history.can_redo());

        assert_eq!(history.redo(1), Some(2));
        history.push(2);
        assert!(!history.can_redo());
        assert_eq!(history.redo(9), None);
    }

    #[test]
    fn test_size_limit_drops_oldest() {
        let mut history = History::new(2);
        for state in 0..5 {
            history.push(state);
        }
        assert_eq!(history.undo(5), Some(4));
        assert_eq!(history.undo(4), Some(3));
        assert_eq!(history.undo(3), None);
    }
}
