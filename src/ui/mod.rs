//! Presentation sink: how dispatched events reach the terminal.

mod theme;

use std::io::{self, Write};
use theme::Theme;

/// Rendering of session events. The session supplies the timestamp; styling
/// is entirely up to the implementation.
pub trait Presenter: Send + Sync {
    fn display_message(&self, timestamp: &str, sender: &str, text: &str);
    fn display_info(&self, timestamp: &str, line: &str);
    fn display_error(&self, timestamp: &str, text: &str);
}

/// Line-per-event output on stdout, optionally colored.
pub struct TerminalPresenter {
    color: bool,
}

impl TerminalPresenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn format_message(&self, timestamp: &str, sender: &str, text: &str) -> String {
        let nick = format!("<{}>", sender);
        if self.color {
            format!("[{}] {} {}", timestamp, Theme::nick().apply(nick), text)
        } else {
            format!("[{}] {} {}", timestamp, nick, text)
        }
    }

    fn format_info(&self, timestamp: &str, line: &str) -> String {
        if self.color {
            format!("[{}] {}", timestamp, Theme::info_message().apply(line))
        } else {
            format!("[{}] {}", timestamp, line)
        }
    }

    fn format_error(&self, timestamp: &str, text: &str) -> String {
        if self.color {
            format!("[{}] {}", timestamp, Theme::error_message().apply(text))
        } else {
            format!("[{}] {}", timestamp, text)
        }
    }

    fn emit(&self, line: String) {
        let mut out = io::stdout().lock();
        // A closed stdout is not worth tearing the session down for.
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }
}

impl Presenter for TerminalPresenter {
    fn display_message(&self, timestamp: &str, sender: &str, text: &str) {
        self.emit(self.format_message(timestamp, sender, text));
    }

    fn display_info(&self, timestamp: &str, line: &str) {
        self.emit(self.format_info(timestamp, line));
    }

    fn display_error(&self, timestamp: &str, text: &str) {
        self.emit(self.format_error(timestamp, text));
    }
}
