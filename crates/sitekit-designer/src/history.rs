//! Generic undo/redo over a serializable state value.
//!
//! Snapshots are deep clones produced by a serialize/deserialize round trip,
//! so no history entry ever aliases live state. Correctness-first: O(n) per
//! operation, fine at catalog sizes of a few hundred items.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Undo/redo stack around a current value of type `T`.
#[derive(Debug)]
pub struct History<T> {
    current: T,
    past: Vec<T>,
    future: Vec<T>,
}

impl<T> History<T>
where
    T: Serialize + DeserializeOwned + PartialEq,
{
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Records a discrete, undo-worthy change: the old value is pushed to
    /// the undo stack and the redo stack is cleared. A value deep-equal to
    /// the current one is ignored. If either value fails to clone the whole
    /// operation is a no-op, so history never holds a partial state.
    pub fn set(&mut self, next: T) {
        if next == self.current {
            return;
        }
        let (Some(previous), Some(next)) = (deep_clone(&self.current), deep_clone(&next)) else {
            warn!("state clone failed, discarding history entry");
            return;
        };
        self.past.push(previous);
        self.current = next;
        self.future.clear();
    }

    /// Replaces the current value without touching either stack. Used for
    /// high-frequency continuous mutation (live dragging) where only the
    /// gesture boundaries matter for undo granularity.
    pub fn update(&mut self, next: T) {
        self.current = next;
    }

    /// Pushes a clone of the current value to the undo stack and clears the
    /// redo stack, leaving the value itself unchanged. Called once before a
    /// continuous gesture begins, pairing with `update()` during it.
    pub fn snapshot(&mut self) {
        let Some(copy) = deep_clone(&self.current) else {
            warn!("state clone failed, skipping snapshot");
            return;
        };
        self.past.push(copy);
        self.future.clear();
    }

    /// Steps back one entry. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let Some(current) = deep_clone(&self.current) else {
            self.past.push(previous);
            warn!("state clone failed, undo aborted");
            return false;
        };
        self.future.push(current);
        self.current = previous;
        true
    }

    /// Steps forward one entry. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let Some(current) = deep_clone(&self.current) else {
            self.future.push(next);
            warn!("state clone failed, redo aborted");
            return false;
        };
        self.past.push(current);
        self.current = next;
        true
    }

    /// Drops both stacks, keeping the current value.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

fn deep_clone<T: Serialize + DeserializeOwned>(value: &T) -> Option<T> {
    let json = serde_json::to_value(value).ok()?;
    serde_json::from_value(json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_undo_restores_previous_value() {
        let mut history = History::new(vec![1]);
        history.set(vec![1, 2]);
        history.set(vec![1, 2, 3]);
        assert!(history.can_undo());
        assert!(history.undo());
        assert_eq!(history.current(), &vec![1, 2]);
        assert!(history.undo());
        assert_eq!(history.current(), &vec![1]);
        assert!(!history.undo());
    }

    #[test]
    fn undo_redo_round_trip_restores_every_state() {
        let states = [vec![1], vec![1, 2], vec![1, 2, 3], vec![1, 2, 3, 4]];
        let mut history = History::new(states[0].clone());
        for state in &states[1..] {
            history.set(state.clone());
        }
        for expected in states.iter().rev().skip(1) {
            assert!(history.undo());
            assert_eq!(history.current(), expected);
        }
        for expected in states.iter().skip(1) {
            assert!(history.redo());
            assert_eq!(history.current(), expected);
        }
        assert!(!history.redo());
    }

    #[test]
    fn set_clears_redo_stack() {
        let mut history = History::new(vec![1]);
        history.set(vec![2]);
        history.undo();
        assert!(history.can_redo());
        history.set(vec![3]);
        assert!(!history.can_redo());
    }

    #[test]
    fn set_ignores_equal_value() {
        let mut history = History::new(vec![1]);
        history.set(vec![1]);
        assert!(!history.can_undo());
    }

    #[test]
    fn update_never_touches_the_stacks() {
        let mut history = History::new(vec![1]);
        history.set(vec![2]);
        history.undo();
        let (undo, redo) = (history.can_undo(), history.can_redo());
        for i in 0..10 {
            history.update(vec![i]);
        }
        assert_eq!(history.can_undo(), undo);
        assert_eq!(history.can_redo(), redo);
        assert_eq!(history.current(), &vec![9]);
    }

    #[test]
    fn snapshot_marks_a_gesture_boundary() {
        let mut history = History::new(vec![1]);
        history.snapshot();
        history.update(vec![5]);
        history.update(vec![7]);
        assert!(history.undo());
        assert_eq!(history.current(), &vec![1]);
        assert!(history.redo());
        assert_eq!(history.current(), &vec![7]);
    }
}
