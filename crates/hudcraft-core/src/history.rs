//! Bounded undo/redo history over whole-document snapshots.

use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_UNDO_HISTORY: usize = 20;

/// Snapshot history around a present value.
///
/// Every stored snapshot is an owned value, so mutating the present never
/// reaches into the past or future stacks.
#[derive(Debug, Clone)]
pub struct History<T> {
    present: T,
    /// Oldest first.
    past: VecDeque<T>,
    /// Most recently undone last.
    future: Vec<T>,
    /// The present as it was before the first silent change since the last
    /// recorded step.
    pending: Option<T>,
    limit: usize,
}

impl<T: Clone> History<T> {
    /// Create a history with the default depth.
    pub fn new(present: T) -> Self {
        Self::with_limit(present, MAX_UNDO_HISTORY)
    }

    /// Create a history keeping at most `limit` undo states.
    pub fn with_limit(present: T, limit: usize) -> Self {
        Self {
            present,
            past: VecDeque::new(),
            future: Vec::new(),
            pending: None,
            limit,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Mutable access to the present, bypassing history.
    ///
    /// The change is folded into the next recorded step.
    pub fn present_mut(&mut self) -> &mut T {
        if self.pending.is_none() {
            self.pending = Some(self.present.clone());
        }
        &mut self.present
    }

    /// Replace the present and record an undo step.
    ///
    /// The undo step restores the state before any silent changes that
    /// preceded this commit.
    pub fn commit(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        let before = self.pending.take().unwrap_or(previous);
        self.push_past(before);
        self.future.clear();
    }

    /// Replace the present without recording an undo step.
    pub fn commit_silent(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        if self.pending.is_none() {
            self.pending = Some(previous);
        }
    }

    /// Record the silent changes made since the last step as one undo step.
    /// Returns false if there were none, or they left the present unchanged.
    pub fn commit_pending(&mut self) -> bool
    where
        T: PartialEq,
    {
        match self.pending.take() {
            Some(before) if before != self.present => {
                self.push_past(before);
                self.future.clear();
                true
            }
            _ => false,
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.past.pop_back() {
            Some(snapshot) => {
                self.pending = None;
                let current = std::mem::replace(&mut self.present, snapshot);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(snapshot) => {
                self.pending = None;
                let current = std::mem::replace(&mut self.present, snapshot);
                self.push_past(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Undo states, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &T> {
        self.past.iter()
    }

    /// Drop all undo and redo states, keeping the present.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.pending = None;
    }

    /// Replace the present and drop all history.
    pub fn reset(&mut self, present: T) {
        self.present = present;
        self.clear();
    }

    fn push_past(&mut self, snapshot: T) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}
