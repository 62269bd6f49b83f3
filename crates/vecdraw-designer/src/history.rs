//! Undo/redo history for drawing commands

use vecdraw_core::CommandError;

use crate::commands::{Command, DrawingCommand, EditContext};

/// Manages undo/redo stacks of executed commands.
///
/// History is unbounded. [`CommandManager::clear_stacks`] is the only way
/// to discard it.
#[derive(Debug, Default)]
pub struct CommandManager {
    undo_stack: Vec<DrawingCommand>,
    redo_stack: Vec<DrawingCommand>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare and run a command, then record it.
    ///
    /// Any new action invalidates the redo stack. A failing command is not
    /// recorded and leaves both stacks as they were.
    pub fn execute_command(
        &mut self,
        command: impl Into<DrawingCommand>,
        ctx: &mut EditContext<'_>,
    ) -> Result<(), CommandError> {
        let mut command = command.into();
        if !command.is_prepared() {
            command.prepare(ctx)?;
        }
        command.execute(ctx)?;
        tracing::debug!("Executed {}", command.name());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Undo the most recent command. Returns `Ok(false)` when there is
    /// nothing to undo.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<bool, CommandError> {
        let Some(mut command) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.undo(ctx) {
            tracing::warn!("Undo of {} failed: {}", command.name(), e);
            self.undo_stack.push(command);
            return Err(e);
        }
        tracing::debug!("Undid {}", command.name());
        self.redo_stack.push(command);
        Ok(true)
    }

    /// Re-run the most recently undone command against its original
    /// snapshot. Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, ctx: &mut EditContext<'_>) -> Result<bool, CommandError> {
        let Some(mut command) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = command.execute(ctx) {
            tracing::warn!("Redo of {} failed: {}", command.name(), e);
            self.redo_stack.push(command);
            return Err(e);
        }
        tracing::debug!("Redid {}", command.name());
        self.undo_stack.push(command);
        Ok(true)
    }

    /// Drop all history, e.g. when another document is loaded
    pub fn clear_stacks(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the command `undo` would reverse
    pub fn undo_name(&self) -> Option<&str> {
        self.undo_stack.last().map(|c| c.name())
    }

    /// Name of the command `redo` would re-apply
    pub fn redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }
}
