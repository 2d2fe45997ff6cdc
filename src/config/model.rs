//! Configuration data model.
//!
//! [`AppConfig`] is the optional TOML file: presentation and behavior knobs
//! only, every field defaulted. [`ServerConfig`] carries the connection
//! identity and always comes from the command line.

use serde::{Deserialize, Serialize};

/// Root of the TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Where to connect and who to be.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Hostname or IP address of the IRC server.
    pub host: String,
    pub port: u16,
    pub nickname: String,
    /// Sent as both username and real name in `USER`.
    pub username: String,
    /// Channel joined right after registration.
    pub channel: Option<String>,
}

/// Terminal output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            timestamp_format: default_timestamp_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Farewell sent with `QUIT` on `/quit`.
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            quit_message: default_quit_message(),
        }
    }
}

pub fn default_port() -> u16 {
    6667
}
pub fn default_username() -> String {
    "ircuser".to_string()
}
fn default_true() -> bool {
    true
}
fn default_timestamp_format() -> String {
    "%H:%M:%S".to_string()
}
fn default_quit_message() -> String {
    "Bye".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert!(cfg.ui.color);
        assert_eq!(cfg.ui.timestamp_format, "%H:%M:%S");
        assert_eq!(cfg.behavior.quit_message, "Bye");
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [ui]
            color = false

            [behavior]
            quit_message = "Later"
            "#,
        )
        .unwrap();
        assert!(!cfg.ui.color);
        assert_eq!(cfg.ui.timestamp_format, "%H:%M:%S");
        assert_eq!(cfg.behavior.quit_message, "Later");
    }
}
