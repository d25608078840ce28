use super::BotCommand;

use itertools::Itertools;

/// A user-visible reason a command was not carried out. Rendered as a
/// single reply line to the requesting audience; never logged as a system
/// fault, never affects persisted state.
#[derive(Debug)]
pub enum CommandError {
    /// The typed word is a prefix of no known command
    UnknownCommand,
    /// The typed word is a prefix of more than one command
    Ambiguous(Vec<BotCommand>),
    /// A parameter exactly matched a configured blocked word
    BlockedWord,
    /// The command was understood but refused; the payload is the reason
    Rejected(String),
    /// As `Rejected`, but presented as a warning rather than an error
    Warning(String),
}

impl CommandError {
    /// Render the one-line reply for this error.
    pub fn into_reply(self, prefix: &str) -> String {
        match self {
            CommandError::UnknownCommand => format!(
                "Error: Unrecognized command.  Available commands: {}.",
                BotCommand::command_list(prefix)
            ),
            CommandError::Ambiguous(matches) => format!(
                "Error: Ambiguous command.  Matching commands: {}.",
                matches
                    .iter()
                    .map(|command| format!("{}{}", prefix, command.as_ref()))
                    .join(" ")
            ),
            CommandError::BlockedWord => "Error: Parameters contain blocked word.".to_string(),
            CommandError::Rejected(reason) => format!("Error: {}", reason),
            CommandError::Warning(reason) => format!("Warning: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_lists_everything() {
        let reply = CommandError::UnknownCommand.into_reply(",");
        assert!(reply.starts_with("Error: Unrecognized command."));
        assert!(reply.contains(",begin"));
        assert!(reply.contains(",version"));
    }

    #[test]
    fn ambiguous_lists_only_matches() {
        let reply =
            CommandError::Ambiguous(vec![BotCommand::List, BotCommand::Mine]).into_reply(",");
        assert_eq!(
            reply,
            "Error: Ambiguous command.  Matching commands: ,list ,mine."
        );
    }

    #[test]
    fn rejection_carries_prefix_text() {
        assert_eq!(
            CommandError::Rejected("nope".to_string()).into_reply(","),
            "Error: nope"
        );
        assert_eq!(
            CommandError::Warning("careful".to_string()).into_reply(","),
            "Warning: careful"
        );
    }
}
