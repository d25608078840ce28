/// A tokenised, but not yet processed, message from the server.
///
/// The protocol grammar being recognised here is
/// `[:prefix ]VERB [middle] [:trailing]`; any of the three optional parts
/// may be absent. The command verb is normalised to upper case so that
/// callers can match on it directly.
#[derive(Debug, PartialEq, Eq)]
pub struct ServerMessage {
    /// Sender identity from the prefix, i.e. the nick before any `!`
    pub source: Option<String>,
    /// The command verb, upper-cased
    pub command: String,
    /// Parameter text before the trailing boundary, trimmed
    pub middle: Option<String>,
    /// Parameter text after the trailing boundary, trimmed
    pub trailing: Option<String>,
}

impl ServerMessage {
    /// Create a `ServerMessage` from one received line, without its
    /// terminator. Returns `None` for lines too malformed to carry a
    /// command, which the caller is expected to drop.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim_start();
        if raw.is_empty() {
            return None;
        }

        let (source, rest) = if let Some(prefixed) = raw.strip_prefix(':') {
            // A prefix with nothing after it names nobody and commands nothing
            let space = prefixed.find(' ')?;
            let prefix = &prefixed[..space];
            let sender = match prefix.find('!') {
                Some(bang) => &prefix[..bang],
                None => prefix,
            };
            (Some(sender.to_string()), prefixed[space..].trim_start())
        } else {
            (None, raw)
        };

        if rest.is_empty() {
            return None;
        }

        let (command, params) = match rest.find(char::is_whitespace) {
            Some(offset) => (&rest[..offset], Some(rest[offset..].trim_start())),
            None => (rest, None),
        };
        let command = command.to_ascii_uppercase();

        let mut middle = None;
        let mut trailing = None;

        if let Some(params) = params {
            if let Some(t) = params.strip_prefix(':') {
                trailing = Some(t.trim().to_string());
            } else if let Some(offset) = params.find(" :") {
                let m = params[..offset].trim();
                if !m.is_empty() {
                    middle = Some(m.to_string());
                }
                trailing = Some(params[offset + 2..].trim().to_string());
            } else {
                let m = params.trim();
                if !m.is_empty() {
                    middle = Some(m.to_string());
                }
            }
        }

        Some(Self {
            source,
            command,
            middle,
            trailing,
        })
    }
}
