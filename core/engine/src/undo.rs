//! FILENAME: core/engine/src/undo.rs
//! PURPOSE: Generic undo/redo history over whole-state snapshots.
//! CONTEXT: Any feature wraps its working state in an `UndoHistory`. The
//! history is linear: writing after an undo prunes the redo branch.
//! Methods take `&self` so that callbacks fired by undo/redo can hold a
//! handle to the same history. Writes arriving while a callback runs are
//! dropped, which breaks the "state changed -> write it back" feedback loop.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Default number of snapshots kept.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

/// Whether the history is currently moving between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryPhase {
    /// Writes are accepted.
    Idle,
    /// An undo or redo is in flight; writes are ignored.
    Applying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Upper bound on stored snapshots. Values below 1 are treated as 1.
    pub max_history_size: usize,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        HistoryOptions {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
        }
    }
}

/// A serializable copy of the history contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot<T> {
    pub entries: Vec<T>,
    pub current_index: usize,
}

type Callback<T> = Rc<dyn Fn(&T)>;

/// Bounded linear history of state snapshots.
///
/// Invariants: `entries` is never empty, `current_index < entries.len()`
/// and `entries.len() <= max_history_size`.
pub struct UndoHistory<T> {
    entries: RefCell<VecDeque<T>>,
    current_index: Cell<usize>,
    phase: Cell<HistoryPhase>,
    max_size: usize,
    on_undo: RefCell<Option<Callback<T>>>,
    on_redo: RefCell<Option<Callback<T>>>,
}

/// Holds the history in `Applying` and puts it back to `Idle` on drop,
/// also when a callback panics.
struct ApplyingGuard<'a> {
    phase: &'a Cell<HistoryPhase>,
}

impl<'a> ApplyingGuard<'a> {
    fn enter(phase: &'a Cell<HistoryPhase>) -> Self {
        phase.set(HistoryPhase::Applying);
        ApplyingGuard { phase }
    }
}

impl Drop for ApplyingGuard<'_> {
    fn drop(&mut self) {
        self.phase.set(HistoryPhase::Idle);
    }
}

impl<T: Clone + PartialEq> UndoHistory<T> {
    pub fn new(initial: T) -> Self {
        Self::with_options(initial, HistoryOptions::default())
    }

    pub fn with_options(initial: T, options: HistoryOptions) -> Self {
        let max_size = options.max_history_size.max(1);
        let mut entries = VecDeque::with_capacity(max_size.min(DEFAULT_MAX_HISTORY_SIZE));
        entries.push_back(initial);
        UndoHistory {
            entries: RefCell::new(entries),
            current_index: Cell::new(0),
            phase: Cell::new(HistoryPhase::Idle),
            max_size,
            on_undo: RefCell::new(None),
            on_redo: RefCell::new(None),
        }
    }

    /// Builder form of [`set_on_undo`](Self::set_on_undo).
    pub fn on_undo(self, callback: impl Fn(&T) + 'static) -> Self {
        self.set_on_undo(callback);
        self
    }

    /// Builder form of [`set_on_redo`](Self::set_on_redo).
    pub fn on_redo(self, callback: impl Fn(&T) + 'static) -> Self {
        self.set_on_redo(callback);
        self
    }

    /// Called with the new current state after every successful undo.
    pub fn set_on_undo(&self, callback: impl Fn(&T) + 'static) {
        *self.on_undo.borrow_mut() = Some(Rc::new(callback));
    }

    /// Called with the new current state after every successful redo.
    pub fn set_on_redo(&self, callback: impl Fn(&T) + 'static) {
        *self.on_redo.borrow_mut() = Some(Rc::new(callback));
    }

    /// Records `next` as the newest snapshot.
    ///
    /// Returns false without touching the history when an undo/redo is in
    /// flight or when `next` equals the current state. Otherwise any redo
    /// entries are discarded, `next` is appended and, past capacity, the
    /// oldest entry is evicted.
    pub fn set_state(&self, next: T) -> bool {
        if self.phase.get() == HistoryPhase::Applying {
            log::debug!(target: "UNDO", "set_state ignored while applying");
            return false;
        }

        let mut entries = self.entries.borrow_mut();
        let index = self.current_index.get();
        if entries.get(index) == Some(&next) {
            return false;
        }

        entries.truncate(index + 1);
        entries.push_back(next);
        while entries.len() > self.max_size {
            entries.pop_front();
        }
        self.current_index.set(entries.len() - 1);

        log::trace!(target: "UNDO", "pushed entry, len={} index={}", entries.len(), entries.len() - 1);
        true
    }

    /// Steps back one snapshot. No-op at the oldest entry.
    pub fn undo(&self) -> Option<T> {
        let index = self.current_index.get();
        if index == 0 || self.phase.get() == HistoryPhase::Applying {
            return None;
        }
        self.move_to(index - 1, &self.on_undo)
    }

    /// Steps forward one snapshot. No-op at the newest entry.
    pub fn redo(&self) -> Option<T> {
        let index = self.current_index.get();
        if index + 1 >= self.len() || self.phase.get() == HistoryPhase::Applying {
            return None;
        }
        self.move_to(index + 1, &self.on_redo)
    }

    fn move_to(&self, index: usize, callback: &RefCell<Option<Callback<T>>>) -> Option<T> {
        let _guard = ApplyingGuard::enter(&self.phase);

        self.current_index.set(index);
        let state = self.entries.borrow().get(index).cloned()?;
        log::debug!(target: "UNDO", "moved to index={} of len={}", index, self.len());

        // Clone the handle out so the callback may re-enter this history.
        let callback = callback.borrow().clone();
        if let Some(callback) = callback {
            callback(&state);
        }
        Some(state)
    }

    /// Replaces all history with a single entry.
    pub fn reset(&self, state: T) {
        let mut entries = self.entries.borrow_mut();
        entries.clear();
        entries.push_back(state);
        self.current_index.set(0);
        log::debug!(target: "UNDO", "history reset");
    }

    /// The state at the current position.
    pub fn current(&self) -> T {
        let entries = self.entries.borrow();
        entries[self.current_index.get()].clone()
    }

    pub fn can_undo(&self) -> bool {
        self.current_index.get() > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index.get() + 1 < self.len()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Always false; a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index.get()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn phase(&self) -> HistoryPhase {
        self.phase.get()
    }

    pub fn snapshot(&self) -> HistorySnapshot<T> {
        HistorySnapshot {
            entries: self.entries.borrow().iter().cloned().collect(),
            current_index: self.current_index.get(),
        }
    }
}

impl<T> std::fmt::Debug for UndoHistory<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoHistory")
            .field("len", &self.entries.borrow().len())
            .field("current_index", &self.current_index.get())
            .field("phase", &self.phase.get())
            .field("max_size", &self.max_size)
            .finish()
    }
}
