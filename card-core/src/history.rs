//! Linear undo history of canvas snapshots.
//!
//! The history lives next to the [`CanvasState`] it records, never inside
//! it, so a snapshot can't contain older snapshots.
//!
//! ```text
//! push A, push B, push C      [A, B, C]   cursor 2
//! undo                        [A, B, C]   cursor 1   -> B
//! push D                      [A, B, D]   cursor 2   (C discarded)
//! ```
//!
//! There is no redo: pushing after an undo drops everything past the cursor.

use crate::CanvasState;

/// Default maximum number of snapshots retained.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Bounded linear undo log with a cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: Vec<CanvasState>,
    /// Index of the active snapshot; `None` until the first push.
    cursor: Option<usize>,
    /// Maximum retained snapshots; `0` disables the bound.
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    /// Create an empty history holding at most `max_depth` snapshots
    /// (`0` for no limit).
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_depth,
        }
    }

    /// Record `snapshot` as the newest entry.
    ///
    /// Entries after the cursor are discarded first. When the depth bound is
    /// exceeded the oldest entry is evicted.
    pub fn push(&mut self, snapshot: CanvasState) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.entries.len() {
            tracing::debug!(
                discarded = self.entries.len() - keep,
                "Truncating history past cursor"
            );
        }
        self.entries.truncate(keep);
        self.entries.push(snapshot);

        if self.max_depth > 0 && self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            tracing::warn!(
                max_depth = self.max_depth,
                "History full, evicting {excess} oldest snapshot(s)"
            );
            self.entries.drain(..excess);
        }
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one snapshot.
    ///
    /// Returns the snapshot before the cursor and moves the cursor onto it.
    /// At the bottom of history (cursor at `0` or nothing pushed) `current`
    /// is returned unchanged and the cursor stays put.
    #[must_use]
    pub fn undo(&mut self, current: CanvasState) -> CanvasState {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.entries[c - 1].clone()
            }
            _ => current,
        }
    }

    /// Return the snapshot under the cursor, discarding whatever uncommitted
    /// edits `current` holds. The cursor does not move.
    #[must_use]
    pub fn revert(&self, current: CanvasState) -> CanvasState {
        self.current().cloned().unwrap_or(current)
    }

    /// Whether [`History::undo`] would change anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Drop every snapshot and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&CanvasState> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Cursor position, `None` when nothing has been pushed since the last reset.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Cursor in signed form, `-1` meaning no active snapshot.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn index(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    /// All retained snapshots, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[CanvasState] {
        &self.entries
    }

    /// Number of retained snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no snapshot is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The depth bound (`0` = unbounded).
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}
