//! User slash-command parser.
//!
//! Parses `/command arg1 arg2 ...` input lines into typed [`ParsedCommand`]
//! values that the input loop can act on.

/// A parsed user command.
#[derive(Debug, PartialEq, Eq)]
pub enum ParsedCommand {
    Join { channel: String },
    Quit,
    /// A known command in a form we don't act on (e.g. `/join` without
    /// exactly one argument). Dropped without feedback.
    Ignored,
    Unknown { name: String },
}

/// Parse a slash-command string into a [`ParsedCommand`].
///
/// Returns `None` if the input does not start with `/`. The command name is
/// the first whitespace-separated token and is matched exactly.
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let rest = input.strip_prefix('/')?;
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let name = parts.first().copied().unwrap_or("");

    let parsed = match name {
        "join" => match parts.as_slice() {
            [_, channel] => ParsedCommand::Join {
                channel: channel.to_string(),
            },
            _ => ParsedCommand::Ignored,
        },
        "quit" => ParsedCommand::Quit,
        _ => ParsedCommand::Unknown {
            name: name.to_string(),
        },
    };
    Some(parsed)
}
