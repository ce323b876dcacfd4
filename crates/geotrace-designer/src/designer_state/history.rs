//! Undo/redo operations for document state.

use super::DocumentState;

impl DocumentState {
    /// Undo the most recent coordinate edit.
    ///
    /// Returns `true` if an edit was undone.
    pub fn undo(&mut self) -> bool {
        let entry = self.history.borrow_mut().begin_undo();
        let Some(entry) = entry else {
            return false;
        };
        let result = entry.command.apply(&mut self.collection);
        self.history.borrow_mut().end();

        if let Err(e) = &result {
            tracing::warn!("Undo {} failed: {}", entry.action_name, e);
        }
        result.is_ok()
    }

    /// Redo the most recently undone edit.
    pub fn redo(&mut self) -> bool {
        let entry = self.history.borrow_mut().begin_redo();
        let Some(entry) = entry else {
            return false;
        };
        let result = entry.command.apply(&mut self.collection);
        self.history.borrow_mut().end();

        if let Err(e) = &result {
            tracing::warn!("Redo {} failed: {}", entry.action_name, e);
        }
        result.is_ok()
    }

    pub fn can_undo(&self) -> bool {
        self.history.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.borrow().can_redo()
    }

    /// Label for the Undo menu item, e.g. "Add Coordinate"
    pub fn undo_action_name(&self) -> Option<String> {
        self.history.borrow().undo_action_name().map(str::to_owned)
    }

    /// Label for the Redo menu item
    pub fn redo_action_name(&self) -> Option<String> {
        self.history.borrow().redo_action_name().map(str::to_owned)
    }

    /// Clear undo/redo history.
    pub fn clear_history(&mut self) {
        self.history.borrow_mut().clear();
    }
}
