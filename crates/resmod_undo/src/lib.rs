//! Undo and redo for resmod edits.
//!
//! Every user-facing edit becomes a [`Command`] with a forward and a reverse
//! mutation. Commands are handed to a [`Commander`], typically a [`ModEditor`],
//! which executes them inside one transaction of the mod and keeps the undo and
//! redo history. Related commands are grouped with a [`CommandList`] so they undo
//! and redo as one unit.

pub mod command;
pub mod editor;
pub mod error;
pub mod undoable;

pub use command::{Command, CommandList, Commander, FnCommand};
pub use editor::ModEditor;
pub use error::{Error, Result};
pub use undoable::{
    DelResourceCommand, OverrideState, PatchBlocksCommand, SetBlockCommand, SetBlocksCommand,
};
