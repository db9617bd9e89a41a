//! Undo/redo history around a mod.

use crate::command::{Command, Commander};
use crate::error::{Error, Result};
use resmod_world::{Mod, ModTransaction};

/// Owns a [`Mod`] and executes commands on it, remembering them for undo and redo.
///
/// Each execution runs inside one transaction of the mod, so every command,
/// including a [`CommandList`](crate::CommandList), causes exactly one change
/// notification.
pub struct ModEditor {
    game_mod: Mod,
    undo_stack: Vec<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_size: usize,
    dirty: bool,
}

impl ModEditor {
    /// Default maximum history size.
    pub const DEFAULT_MAX_SIZE: usize = 100;

    pub fn new(game_mod: Mod) -> Self {
        Self::with_capacity(game_mod, Self::DEFAULT_MAX_SIZE)
    }

    pub fn with_capacity(game_mod: Mod, max_size: usize) -> Self {
        Self {
            game_mod,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            dirty: false,
        }
    }

    pub fn game_mod(&self) -> &Mod {
        &self.game_mod
    }

    pub fn into_inner(self) -> Mod {
        self.game_mod
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.description())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.description())
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// True if the mod changed since the last [`mark_saved`](Self::mark_saved).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Forget all history without touching the mod.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Revert the most recent command.
    pub fn undo(&mut self) -> Result<()> {
        let command = self.undo_stack.pop().ok_or(Error::NothingToUndo)?;
        tracing::debug!("Undo: {}", command.description());
        if let Err(err) = self.apply(|trans| command.reverse(trans)) {
            self.undo_stack.push(command);
            return Err(err);
        }
        command.restore();
        self.redo_stack.push(command);
        self.dirty = true;
        Ok(())
    }

    /// Apply the most recently reverted command again.
    pub fn redo(&mut self) -> Result<()> {
        let command = self.redo_stack.pop().ok_or(Error::NothingToRedo)?;
        tracing::debug!("Redo: {}", command.description());
        if let Err(err) = self.apply(|trans| command.forward(trans)) {
            self.redo_stack.push(command);
            return Err(err);
        }
        command.restore();
        self.undo_stack.push(command);
        self.dirty = true;
        Ok(())
    }

    /// Run one direction of a command in a single transaction.
    ///
    /// If an action fails after earlier ones were applied, the mod is reset to
    /// its state before the transaction.
    fn apply<F>(&mut self, mutation: F) -> Result<()>
    where
        F: FnOnce(&mut ModTransaction) -> Result<()>,
    {
        let before = self.game_mod.snapshot();
        let result = self.game_mod.try_modify(mutation);
        if let Err(Error::World(resmod_world::Error::TransactionFailed { index, .. })) = &result {
            tracing::warn!("Rolling back transaction that failed at action {}", index);
            self.game_mod.reset(before);
        }
        result
    }
}

impl Commander for ModEditor {
    /// Execute the command; a failing command is not remembered.
    fn queue(&mut self, command: Box<dyn Command>) -> Result<()> {
        tracing::debug!("Execute: {}", command.description());
        self.apply(|trans| command.forward(trans))?;
        command.restore();

        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.dirty = true;
        while self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
        Ok(())
    }
}
