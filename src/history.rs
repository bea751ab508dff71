//! Snapshot-based undo/redo.
//!
//! `present` is the live value. Atomic edits go through [`History::commit`];
//! drags mutate `present` in place and call [`History::record`] once at the
//! end with the value captured before the drag started.

#[derive(Clone, Debug)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new(present: T, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// In-place access for drag frames. Nothing is recorded.
    pub fn present_mut(&mut self) -> &mut T {
        &mut self.present
    }

    /// Replaces the present with `next`, pushing the old present onto the
    /// undo stack. Returns false when `next` is identical to the present.
    pub fn commit(&mut self, next: T) -> bool {
        if next == self.present {
            return false;
        }
        let prev = std::mem::replace(&mut self.present, next);
        self.push_past(prev);
        true
    }

    /// Pushes `before` as the undo step for edits already applied to the
    /// present. Returns false when nothing changed since `before`.
    pub fn record(&mut self, before: T) -> bool {
        if before == self.present {
            return false;
        }
        self.push_past(before);
        true
    }

    fn push_past(&mut self, snapshot: T) {
        self.past.push(snapshot);
        if self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(0..overflow);
        }
        self.future.clear();
    }

    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, prev);
        self.future.push(current);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
