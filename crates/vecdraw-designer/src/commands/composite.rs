use vecdraw_core::CommandError;

use super::{require_prepared, Command, DrawingCommand, EditContext};

/// Runs several commands as one undoable step.
///
/// Children are prepared lazily, right before their first execution, so
/// each sees the document as left by the ones before it. If any child
/// fails, the children already applied are undone and the batch fails as
/// a whole.
#[derive(Debug, Clone)]
pub struct CompositeCommand {
    name: String,
    commands: Vec<DrawingCommand>,
    prepared: bool,
}

impl CompositeCommand {
    pub fn new(name: impl Into<String>, commands: Vec<DrawingCommand>) -> Self {
        Self {
            name: name.into(),
            commands,
            prepared: false,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawingCommand] {
        &self.commands
    }

    fn roll_back(&mut self, applied: usize, ctx: &mut EditContext<'_>) {
        for command in self.commands[..applied].iter_mut().rev() {
            if let Err(e) = command.undo(ctx) {
                tracing::warn!("Rolling back {} failed: {}", command.name(), e);
            }
        }
    }

    fn roll_forward(&mut self, from: usize, ctx: &mut EditContext<'_>) {
        for command in self.commands[from..].iter_mut() {
            if let Err(e) = command.execute(ctx) {
                tracing::warn!("Re-applying {} failed: {}", command.name(), e);
            }
        }
    }
}

impl Command for CompositeCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn prepare(&mut self, _ctx: &EditContext<'_>) -> Result<(), CommandError> {
        if self.commands.is_empty() {
            return Err(CommandError::precondition(&self.name, "nothing to do"));
        }
        self.prepared = true;
        Ok(())
    }

    fn execute(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, &self.name)?;
        for i in 0..self.commands.len() {
            let command = &mut self.commands[i];
            let result = if command.is_prepared() {
                command.execute(ctx)
            } else {
                command.prepare(ctx).and_then(|_| command.execute(ctx))
            };
            if let Err(e) = result {
                tracing::warn!("{} failed at step {}: {}", self.name, i + 1, e);
                self.roll_back(i, ctx);
                return Err(e);
            }
        }
        Ok(())
    }

    fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CommandError> {
        require_prepared(self.prepared, &self.name)?;
        for i in (0..self.commands.len()).rev() {
            if let Err(e) = self.commands[i].undo(ctx) {
                tracing::warn!("{} undo failed at step {}: {}", self.name, i + 1, e);
                self.roll_forward(i + 1, ctx);
                return Err(e);
            }
        }
        Ok(())
    }

    fn is_prepared(&self) -> bool {
        self.prepared
    }
}
