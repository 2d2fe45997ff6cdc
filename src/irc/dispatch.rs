//! Inbound line classification.
//!
//! This is a deliberately small recognizer, not a full RFC 1459 parser: it
//! knows keep-alive probes and channel/private messages and hands everything
//! else to the display path untouched. No message tags, CTCP or multi-word
//! prefixes.

/// What the session should do with one inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Answer a keep-alive probe with `PONG <payload>`.
    ReplyPong { payload: String },
    /// A `PRIVMSG` addressed to a channel or to us.
    DeliverMessage {
        sender: String,
        target: String,
        text: String,
    },
    /// Anything else, shown verbatim.
    DisplayInfo { line: String },
}

/// Classify a single terminator-free protocol line.
pub fn dispatch(line: &str) -> Effect {
    if let Some(payload) = ping_payload(line) {
        return Effect::ReplyPong {
            payload: payload.to_string(),
        };
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() >= 4 && parts[1] == "PRIVMSG" {
        let prefix = parts[0].split('!').next().unwrap_or(parts[0]);
        let sender = prefix.strip_prefix(':').unwrap_or(prefix);
        let joined = parts[3..].join(" ");
        let text = joined.strip_prefix(':').unwrap_or(&joined);
        return Effect::DeliverMessage {
            sender: sender.to_string(),
            target: parts[2].to_string(),
            text: text.to_string(),
        };
    }

    Effect::DisplayInfo {
        line: line.to_string(),
    }
}

/// Everything after the first space of a `PING` line, verbatim.
fn ping_payload(line: &str) -> Option<&str> {
    if line == "PING" {
        return Some("");
    }
    line.strip_prefix("PING ")
}
