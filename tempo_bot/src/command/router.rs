use super::{handlers, BotCommand, CommandContext, CommandError};

use once_cell::sync::Lazy;
use regex::Regex;
use tempo_engine::{Engine, PRIVATE_AUDIENCE};

/// Messages relayed by the bridge wrap the real sender and text as
/// `<name (realname)> text`; the parenthesised name is the identity the
/// engine should see.
static BRIDGE_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<.+ \((.+)\)> (.*)").expect("bridge pattern is valid"));

/// The ordered reply lines produced for one processed message, addressed
/// to the audience they should be sent to.
#[derive(Debug)]
pub struct Reply {
    pub audience: String,
    pub lines: Vec<String>,
}

/// Decides whether an incoming channel or private message is addressed to
/// the bot and, if so, resolves and dispatches the command in it.
pub struct Router {
    nick: String,
    prefix: String,
    bridge_nick: Option<String>,
    blocked_words: Vec<String>,
}

impl Router {
    pub fn new(
        nick: String,
        prefix: String,
        bridge_nick: Option<String>,
        blocked_words: Vec<String>,
    ) -> Self {
        Self {
            nick,
            prefix,
            bridge_nick,
            blocked_words,
        }
    }

    /// Process one PRIVMSG. Returns the reply to send, or `None` when the
    /// message is not for the bot or had to be dropped as malformed.
    pub fn route(
        &self,
        engine: &mut Engine,
        sender: &str,
        recipient: &str,
        text: &str,
        now: i64,
    ) -> Option<Reply> {
        // A message is private iff it was addressed to our own nick
        let private = recipient == self.nick;
        let bridged = self
            .bridge_nick
            .as_deref()
            .map_or(false, |bridge| bridge == sender);

        let text = text.replace(['\0', '\r', '\n'], " ");

        // The bridge relays channel traffic; it can never legitimately
        // message us in private
        if private && bridged {
            tracing::error!("Ignoring private message from bridge");
            return None;
        }

        let (person, message) = if bridged {
            match BRIDGE_FORMAT.captures(&text) {
                Some(caps) => (caps[1].to_string(), caps[2].to_string()),
                None => {
                    tracing::error!("Ignoring malformed message from bridge");
                    return None;
                }
            }
        } else {
            (sender.to_string(), text)
        };

        if !message.starts_with(&self.prefix) {
            return None;
        }

        let audience = if private { sender } else { recipient };
        let audience_key = if private { PRIVATE_AUDIENCE } else { recipient };

        let mut words = message.split_whitespace();
        let first = words.next()?;
        let candidate = first.strip_prefix(&self.prefix).unwrap_or(first);
        let params: Vec<&str> = words.collect();

        let matches = BotCommand::resolve(candidate);
        let mut ctx = CommandContext {
            engine,
            prefix: &self.prefix,
            person: &person,
            audience,
            audience_key,
            private,
            now,
        };

        let result = match matches.len() {
            0 => Err(CommandError::UnknownCommand),
            1 => {
                // Blocked words are checked only once the command resolved
                if params
                    .iter()
                    .any(|param| self.blocked_words.iter().any(|word| word == param))
                {
                    Err(CommandError::BlockedWord)
                } else {
                    handlers::dispatch(matches[0], &mut ctx, &params)
                }
            }
            _ => Err(CommandError::Ambiguous(matches)),
        };

        let lines = match result {
            Ok(lines) => lines,
            Err(error) => vec![error.into_reply(&self.prefix)],
        };

        Some(Reply {
            audience: audience.to_string(),
            lines,
        })
    }
}
