use crate::application::command::Command;
use std::collections::HashMap;

/// Opaque handle to a command held in the history registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(u64);

/// Registry of live commands plus the done/undone stacks.
///
/// The stacks hold handles, the registry owns the commands. A handle is a
/// member of at most one stack at any time; a command is dropped when it is
/// evicted from the registry (clearing the redo side is the only eviction
/// path).
#[derive(Default)]
pub struct History {
    commands: HashMap<CommandId, Command>,
    done: Vec<CommandId>,
    undone: Vec<CommandId>,
    next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command and returns its handle. The command is not yet a
    /// member of either stack.
    pub fn register(&mut self, command: Command) -> CommandId {
        let id = CommandId(self.next_id);
        self.next_id += 1;
        self.commands.insert(id, command);
        id
    }

    pub fn command(&self, id: CommandId) -> Option<&Command> {
        self.commands.get(&id)
    }

    pub fn command_mut(&mut self, id: CommandId) -> Option<&mut Command> {
        self.commands.get_mut(&id)
    }

    pub fn push_done(&mut self, id: CommandId) {
        self.done.push(id);
    }

    pub fn pop_done(&mut self) -> Option<CommandId> {
        self.done.pop()
    }

    pub fn push_undone(&mut self, id: CommandId) {
        self.undone.push(id);
    }

    pub fn pop_undone(&mut self) -> Option<CommandId> {
        self.undone.pop()
    }

    /// Drops every undone command: the handles leave the stack and the
    /// commands leave the registry.
    pub fn clear_undone(&mut self) {
        for id in self.undone.drain(..) {
            self.commands.remove(&id);
        }
    }

    pub fn done_depth(&self) -> usize {
        self.done.len()
    }

    pub fn undone_depth(&self) -> usize {
        self.undone.len()
    }
}
