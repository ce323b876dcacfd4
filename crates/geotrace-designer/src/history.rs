//! Undo/redo history for coordinate edits.
//!
//! Two bounded stacks of [`LayerCommand`]s. A command on the undo stack is
//! the inverse of an edit the user made; applying it performs that inverse,
//! and the layer records the inverse of *that* edit, which the manager
//! routes onto the redo stack because an undo transaction is open.
//!
//! ```text
//! add(c)            undo stack: [Remove c]   redo stack: []
//! undo -> remove c  undo stack: []           redo stack: [Add c]
//! redo -> add c     undo stack: [Remove c]   redo stack: []
//! ```

use crate::commands::{LayerCommand, UndoSink};
use geotrace_core::LayerId;
use std::collections::VecDeque;

/// Default number of entries kept on each stack
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// A recorded command and the label shown in Undo/Redo menu items
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub command: LayerCommand,
    pub action_name: String,
}

/// What the manager is currently replaying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndoPhase {
    #[default]
    Idle,
    Undoing,
    Redoing,
}

/// Bounded undo and redo stacks of layer commands.
#[derive(Debug)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
    capacity: usize,
    phase: UndoPhase,
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoRedoManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create a manager keeping at most `capacity` entries per stack
    /// (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            capacity: capacity.max(1),
            phase: UndoPhase::Idle,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn phase(&self) -> UndoPhase {
        self.phase
    }

    pub fn can_undo(&self) -> bool {
        self.phase == UndoPhase::Idle && !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.phase == UndoPhase::Idle && !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Label of the entry the next undo would replay
    pub fn undo_action_name(&self) -> Option<&str> {
        self.undo_stack.back().map(|e| e.action_name.as_str())
    }

    /// Label of the entry the next redo would replay
    pub fn redo_action_name(&self) -> Option<&str> {
        self.redo_stack.back().map(|e| e.action_name.as_str())
    }

    /// Open an undo transaction and hand out the command to apply.
    ///
    /// Returns `None` if there is nothing to undo or a transaction is
    /// already open. The caller applies the command and then calls
    /// [`UndoRedoManager::end`].
    pub fn begin_undo(&mut self) -> Option<HistoryEntry> {
        if self.phase != UndoPhase::Idle {
            return None;
        }
        let entry = self.undo_stack.pop_back()?;
        self.phase = UndoPhase::Undoing;
        tracing::debug!("Undo {}", entry.action_name);
        Some(entry)
    }

    /// Open a redo transaction; see [`UndoRedoManager::begin_undo`].
    pub fn begin_redo(&mut self) -> Option<HistoryEntry> {
        if self.phase != UndoPhase::Idle {
            return None;
        }
        let entry = self.redo_stack.pop_back()?;
        self.phase = UndoPhase::Redoing;
        tracing::debug!("Redo {}", entry.action_name);
        Some(entry)
    }

    /// Close the open transaction
    pub fn end(&mut self) {
        self.phase = UndoPhase::Idle;
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.phase = UndoPhase::Idle;
    }

    /// Drop every entry that edits `layer`, e.g. after the layer was removed.
    pub fn forget_layer(&mut self, layer: LayerId) {
        let before = self.undo_stack.len() + self.redo_stack.len();
        self.undo_stack.retain(|e| e.command.layer() != layer);
        self.redo_stack.retain(|e| e.command.layer() != layer);
        let dropped = before - (self.undo_stack.len() + self.redo_stack.len());
        if dropped > 0 {
            tracing::debug!("Dropped {} history entries for {}", dropped, layer);
        }
    }

    fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
        if stack.len() >= capacity {
            stack.pop_front();
        }
        stack.push_back(entry);
    }
}

impl UndoSink for UndoRedoManager {
    fn record(&mut self, command: LayerCommand, action_name: &str) {
        let entry = HistoryEntry {
            command,
            action_name: action_name.to_string(),
        };
        match self.phase {
            UndoPhase::Idle => {
                Self::push_bounded(&mut self.undo_stack, entry, self.capacity);
                self.redo_stack.clear();
            }
            UndoPhase::Undoing => Self::push_bounded(&mut self.redo_stack, entry, self.capacity),
            UndoPhase::Redoing => Self::push_bounded(&mut self.undo_stack, entry, self.capacity),
        }
    }

    fn is_undoing(&self) -> bool {
        self.phase == UndoPhase::Undoing
    }
}
