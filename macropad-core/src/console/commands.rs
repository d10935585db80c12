//! Command table
//!
//! Commands are looked up by exact, case-sensitive name. When a name is
//! registered more than once the last registration wins.

use core::fmt;

use super::writer::Output;

/// Something the console can run when a command line matches
pub trait Action {
    fn run(&self, out: &mut dyn Output);
}

impl<F> Action for F
where
    F: Fn(&mut dyn Output),
{
    fn run(&self, out: &mut dyn Output) {
        self(out)
    }
}

/// A named command
#[derive(Clone, Copy)]
pub struct Command<'a> {
    pub name: &'a str,
    pub action: &'a dyn Action,
}

impl<'a> Command<'a> {
    pub const fn new(name: &'a str, action: &'a dyn Action) -> Self {
        Self { name, action }
    }
}

impl fmt::Debug for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

/// Ordered view over a slice of commands
#[derive(Debug, Clone, Copy)]
pub struct CommandTable<'a> {
    commands: &'a [Command<'a>],
}

impl<'a> CommandTable<'a> {
    pub const fn new(commands: &'a [Command<'a>]) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Find the last command registered under exactly `name`
    ///
    /// Compares raw bytes, so a line that is not valid UTF-8 never matches.
    pub fn find(&self, name: impl AsRef<[u8]>) -> Option<&'a Command<'a>> {
        let name = name.as_ref();
        self.commands
            .iter()
            .rev()
            .find(|c| c.name.as_bytes() == name)
    }

    /// Command names in registration order, each name once
    pub fn names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let commands = self.commands;
        commands
            .iter()
            .enumerate()
            .filter(move |(i, c)| !commands[..*i].iter().any(|p| p.name == c.name))
            .map(|(_, c)| c.name)
    }

    /// Print the command list
    pub fn help(&self, out: &mut dyn Output) {
        out.print("Commands :\r\n");
        for name in self.names() {
            out.emit(format_args!("{}\r\n", name));
        }
    }
}

fn test_one(out: &mut dyn Output) {
    out.print("Test one\r\n");
    out.print("Test one - [done]\r\n");
}

fn test_two(out: &mut dyn Output) {
    out.print("Test two\r\n");
    out.print("Test two - [done]\r\n");
}

fn test_three(out: &mut dyn Output) {
    out.print("Test three\r\n");
    out.print("Test three - [done]\r\n");
}

/// Bench commands shipped with the firmware
pub const DEMO_COMMANDS: &[Command<'static>] = &[
    Command::new("test1", &test_one),
    Command::new("test2", &test_two),
    Command::new("test3", &test_three),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsoleConfig;
    use crate::console::writer::BufferOutput;
    use core::cell::Cell;

    #[test]
    fn test_last_match_wins() {
        let first = Cell::new(0);
        let second = Cell::new(0);
        let a = |_: &mut dyn Output| first.set(first.get() + 1);
        let b = |_: &mut dyn Output| second.set(second.get() + 1);
        let commands = [Command::new("x", &a), Command::new("x", &b)];
        let table = CommandTable::new(&commands);

        let mut out = BufferOutput::<64>::new(ConsoleConfig::default());
        table.find("x").unwrap().action.run(&mut out);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_find_is_exact_and_case_sensitive() {
        let table = CommandTable::new(DEMO_COMMANDS);
        assert!(table.find("test1").is_some());
        assert!(table.find("TEST1").is_none());
        assert!(table.find("test").is_none());
        assert!(table.find("test1 ").is_none());
        assert!(table.find(&b"test1"[..]).is_some());
        assert!(table.find(&b"test1\xFF"[..]).is_none());
    }

    #[test]
    fn test_help_lists_distinct_names_in_order() {
        let noop = |_: &mut dyn Output| {};
        let commands = [
            Command::new("b", &noop),
            Command::new("a", &noop),
            Command::new("b", &noop),
        ];
        let table = CommandTable::new(&commands);

        let mut out = BufferOutput::<64>::new(ConsoleConfig::default());
        table.help(&mut out);
        assert_eq!(out.as_str(), "Commands :\r\nb\r\na\r\n");
    }

    #[test]
    fn test_demo_command_output() {
        let table = CommandTable::new(DEMO_COMMANDS);
        let mut out = BufferOutput::<64>::new(ConsoleConfig::default());
        table.find("test2").unwrap().action.run(&mut out);
        assert_eq!(out.as_str(), "Test two\r\nTest two - [done]\r\n");
    }
}
