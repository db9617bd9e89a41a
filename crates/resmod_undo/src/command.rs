//! Reversible commands over a [`Modder`].
//!
//! A [`Command`] describes one user-facing edit as a forward and a reverse
//! mutation, both expressed against a [`Modder`], plus a `restore` hook for
//! state outside the mod (cursor, selection) that is invoked after either
//! direction has been applied.

use crate::error::Result;
use resmod_world::Modder;

/// An edit that can be applied and reverted.
pub trait Command {
    /// Human-readable description for the undo/redo menu.
    fn description(&self) -> &str;

    /// Queue the mutation performing the edit.
    fn forward(&self, modder: &mut dyn Modder) -> Result<()>;

    /// Queue the mutation reverting the edit.
    fn reverse(&self, modder: &mut dyn Modder) -> Result<()>;

    /// Restore state outside the mod; invoked after forward and after reverse.
    fn restore(&self) {}
}

/// Receives commands to execute and remember.
pub trait Commander {
    /// Execute the command and add it to the history.
    fn queue(&mut self, command: Box<dyn Command>) -> Result<()>;

    /// Execute several commands as one unit.
    fn queue_all(&mut self, description: &str, commands: Vec<Box<dyn Command>>) -> Result<()> {
        self.queue(Box::new(CommandList::new(description, commands)))
    }
}

/// Commands grouped into one unit.
///
/// Forward runs the members in order, reverse in reverse order.
pub struct CommandList {
    description: String,
    commands: Vec<Box<dyn Command>>,
}

impl CommandList {
    pub fn new(description: impl Into<String>, commands: Vec<Box<dyn Command>>) -> Self {
        Self {
            description: description.into(),
            commands,
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for CommandList {
    fn description(&self) -> &str {
        &self.description
    }

    fn forward(&self, modder: &mut dyn Modder) -> Result<()> {
        for command in &self.commands {
            command.forward(modder)?;
        }
        Ok(())
    }

    fn reverse(&self, modder: &mut dyn Modder) -> Result<()> {
        for command in self.commands.iter().rev() {
            command.reverse(modder)?;
        }
        Ok(())
    }

    fn restore(&self) {
        for command in &self.commands {
            command.restore();
        }
    }
}

type Mutation = Box<dyn Fn(&mut dyn Modder) -> Result<()>>;

/// Command built from closures.
pub struct FnCommand {
    description: String,
    forward: Mutation,
    reverse: Mutation,
    restore: Option<Box<dyn Fn()>>,
}

impl FnCommand {
    pub fn new<F, R>(description: impl Into<String>, forward: F, reverse: R) -> Self
    where
        F: Fn(&mut dyn Modder) -> Result<()> + 'static,
        R: Fn(&mut dyn Modder) -> Result<()> + 'static,
    {
        Self {
            description: description.into(),
            forward: Box::new(forward),
            reverse: Box::new(reverse),
            restore: None,
        }
    }

    pub fn with_restore<F>(mut self, restore: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.restore = Some(Box::new(restore));
        self
    }
}

impl Command for FnCommand {
    fn description(&self) -> &str {
        &self.description
    }

    fn forward(&self, modder: &mut dyn Modder) -> Result<()> {
        (self.forward)(modder)
    }

    fn reverse(&self, modder: &mut dyn Modder) -> Result<()> {
        (self.reverse)(modder)
    }

    fn restore(&self) {
        if let Some(restore) = &self.restore {
            restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resmod_resource::{Language, ResourceId};
    use resmod_world::{ModAction, ModTransaction};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setting(description: &str, value: u8, log: Rc<RefCell<Vec<String>>>) -> Box<dyn Command> {
        let restore_log = log.clone();
        let name = description.to_string();
        Box::new(
            FnCommand::new(
                description,
                move |modder| {
                    modder.set_resource_block(Language::Any, ResourceId::new(1), 0, vec![value])?;
                    Ok(())
                },
                move |modder| {
                    modder.set_resource_block(Language::Any, ResourceId::new(1), 0, vec![!value])?;
                    Ok(())
                },
            )
            .with_restore(move || restore_log.borrow_mut().push(name.clone())),
        )
    }

    fn written_values(trans: &ModTransaction) -> Vec<u8> {
        trans
            .actions()
            .iter()
            .map(|action| match action {
                ModAction::SetBlock { data, .. } => data[0],
                other => panic!("unexpected action {other:?}"),
            })
            .collect()
    }

    #[test]
    fn test_list_forward_in_order_reverse_backwards() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let list = CommandList::new(
            "text and audio",
            vec![setting("text", 1, log.clone()), setting("audio", 2, log.clone())],
        );

        let mut forward = ModTransaction::new();
        list.forward(&mut forward).unwrap();
        assert_eq!(written_values(&forward), vec![1, 2]);

        let mut reverse = ModTransaction::new();
        list.reverse(&mut reverse).unwrap();
        assert_eq!(written_values(&reverse), vec![!2, !1]);

        list.restore();
        assert_eq!(*log.borrow(), vec!["text".to_string(), "audio".to_string()]);
        assert_eq!(list.description(), "text and audio");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_fn_command_without_restore() {
        let command = FnCommand::new("noop", |_| Ok(()), |_| Ok(()));
        command.restore();

        let mut trans = ModTransaction::new();
        command.forward(&mut trans).unwrap();
        assert!(trans.is_empty());
    }
}
