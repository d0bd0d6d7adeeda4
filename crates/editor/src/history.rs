//! Bounded linear undo/redo history of surface snapshots.

use tracing::debug;

use crate::constants::HISTORY_CAP;

/// Linear, truncating log of full-surface snapshots.
///
/// `cursor` always points at the entry describing the current surface
/// state. Recording while the cursor sits before the end discards the
/// entries beyond it (standard linear-undo semantics, not a tree), and
/// recording past the cap evicts the oldest entry.
pub struct History {
    entries: Vec<Vec<u8>>,
    cursor: usize,
    cap: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAP)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            cap: cap.max(1),
        }
    }

    /// Append a snapshot after the cursor, discarding any redo entries.
    pub fn record(&mut self, snapshot: Vec<u8>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.cap {
            self.entries.remove(0);
            self.cursor -= 1;
        }
        debug!(
            "history: {} entries, cursor at {}",
            self.entries.len(),
            self.cursor
        );
    }

    /// Step back one entry. None when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&[u8]> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward one entry. None when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&[u8]> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.cursor < self.entries.len() - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry, e.g. when the surface is replaced wholesale.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
