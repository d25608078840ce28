//! Command resolution and handling.
//!
//! The command set is a closed enum; dispatch is a match over it, so a
//! command without a handler fails to compile rather than at lookup time.
//! Typed command words may be abbreviated: any unambiguous prefix of a
//! command name resolves to it.

use itertools::Itertools;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use tempo_engine::Engine;

mod error;
pub use error::*;

mod router;
pub use router::*;

pub mod handlers;

/// A convenience definition for the result type returned from command
/// handlers: the ordered reply lines, or a one-line rejection.
pub type CommandResult = Result<Vec<String>, CommandError>;

/// The fixed set of commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum BotCommand {
    Begin,
    Cancel,
    Delete,
    List,
    Mine,
    Running,
    Summary,
    Time,
    Help,
    Version,
}

impl BotCommand {
    /// All commands the candidate word is a prefix of. Zero results means
    /// the word is unrecognized; more than one means it is ambiguous.
    pub fn resolve(word: &str) -> Vec<BotCommand> {
        Self::iter()
            .filter(|command| command.as_ref().starts_with(word))
            .collect()
    }

    /// The full command set rendered for error replies and help, each name
    /// carrying the command prefix.
    pub fn command_list(prefix: &str) -> String {
        Self::iter()
            .map(|command| format!("{}{}", prefix, command.as_ref()))
            .join(" ")
    }
}

/// Everything a handler needs to act on one resolved command: who sent it,
/// where the reply goes, which state sequence it operates on.
pub struct CommandContext<'a> {
    pub engine: &'a mut Engine,
    /// Configured command prefix, for usage texts
    pub prefix: &'a str,
    /// Effective sender, after any bridge-relay rewrite
    pub person: &'a str,
    /// Where replies are sent: the sender for private messages, the
    /// channel otherwise
    pub audience: &'a str,
    /// State key: `"private"` for private messages, the channel otherwise
    pub audience_key: &'a str,
    pub private: bool,
    /// Current time, seconds since the epoch
    pub now: i64,
}
