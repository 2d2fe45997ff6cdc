//! Outbound command formatting.

use std::fmt;

use super::framer::TERMINATOR;

/// Commands the client ever sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Nick(String),
    /// `USER <username> 0 * :<username>`: fixed mode and unused field, the
    /// username doubles as the real name.
    User(String),
    Join(String),
    Privmsg { target: String, text: String },
    Pong(String),
    Quit(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Nick(nick) => write!(f, "NICK {}", nick),
            Command::User(user) => write!(f, "USER {} 0 * :{}", user, user),
            Command::Join(channel) => write!(f, "JOIN {}", channel),
            Command::Privmsg { target, text } => write!(f, "PRIVMSG {} :{}", target, text),
            Command::Pong(payload) if payload.is_empty() => f.write_str("PONG"),
            Command::Pong(payload) => write!(f, "PONG {}", payload),
            Command::Quit(message) => write!(f, "QUIT :{}", message),
        }
    }
}

/// Turn a protocol line into wire bytes, appending `\r\n` unless present.
pub fn encode(line: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(line.len() + TERMINATOR.len());
    bytes.extend_from_slice(line.as_bytes());
    if !bytes.ends_with(TERMINATOR) {
        bytes.extend_from_slice(TERMINATOR);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_appends_terminator_once() {
        assert_eq!(encode("NICK crab"), b"NICK crab\r\n");
        assert_eq!(encode("NICK crab\r\n"), b"NICK crab\r\n");
    }

    #[test]
    fn test_command_wire_forms() {
        assert_eq!(Command::Nick("crab".into()).to_string(), "NICK crab");
        assert_eq!(
            Command::User("ircuser".into()).to_string(),
            "USER ircuser 0 * :ircuser"
        );
        assert_eq!(Command::Join("#test".into()).to_string(), "JOIN #test");
        assert_eq!(
            Command::Privmsg {
                target: "#test".into(),
                text: "hi".into()
            }
            .to_string(),
            "PRIVMSG #test :hi"
        );
        assert_eq!(Command::Pong(":abc".into()).to_string(), "PONG :abc");
        assert_eq!(Command::Pong(String::new()).to_string(), "PONG");
        assert_eq!(Command::Quit("Bye".into()).to_string(), "QUIT :Bye");
    }
}
