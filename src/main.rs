mod app;
mod config;
mod error;
mod irc;
mod logging;
mod ui;

use crate::app::session::Session;
use crate::config::model::{default_port, default_username};
use crate::config::ServerConfig;
use crate::ui::{Presenter, TerminalPresenter};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Minimal IRC client over a raw TCP socket
#[derive(Parser, Debug)]
#[command(name = "crablet")]
#[command(version)]
struct Args {
    /// IRC server hostname
    #[arg(long)]
    server: String,

    /// IRC server port
    #[arg(long, default_value_t = default_port())]
    port: u16,

    /// Nickname
    #[arg(long)]
    nick: String,

    /// Username (also sent as the real name)
    #[arg(long, default_value_t = default_username())]
    user: String,

    /// Channel to join after registering
    #[arg(long)]
    channel: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Config file (defaults to <config dir>/crablet/config.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.server.clone(),
            port: self.port,
            nickname: self.nick.clone(),
            username: self.user.clone(),
            channel: self.channel.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let cfg = config::load_config(args.config.as_deref())?;
    let color = cfg.ui.color && !args.no_color;
    let presenter: Arc<dyn Presenter> = Arc::new(TerminalPresenter::new(color));

    let (mut session, reader) = Session::connect(args.server_config(), &cfg, presenter)
        .await
        .with_context(|| format!("Could not start session with {}", args.server))?;

    session.run(reader, spawn_stdin_reader()).await;
    tracing::debug!(
        running = session.is_running(),
        channel = ?session.current_channel(),
        "session ended"
    );
    Ok(())
}

/// Read stdin on a plain OS thread and forward each line.
///
/// A blocking stdin read cannot be cancelled, so the thread is left behind
/// at exit instead of being joined. Dropping the sender marks end of input.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "stdin read failed");
                    break;
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["crablet", "--server", "irc.example.net", "--nick", "crab"])
            .unwrap();
        let server = args.server_config();
        assert_eq!(server.host, "irc.example.net");
        assert_eq!(server.port, 6667);
        assert_eq!(server.nickname, "crab");
        assert_eq!(server.username, "ircuser");
        assert_eq!(server.channel, None);
        assert!(!args.no_color);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_cli_all_flags() {
        let args = Args::try_parse_from([
            "crablet",
            "--server",
            "localhost",
            "--port",
            "6697",
            "--nick",
            "crab",
            "--user",
            "shell",
            "--channel",
            "#rust",
            "--no-color",
        ])
        .unwrap();
        let server = args.server_config();
        assert_eq!(server.port, 6697);
        assert_eq!(server.username, "shell");
        assert_eq!(server.channel.as_deref(), Some("#rust"));
        assert!(args.no_color);
    }

    #[test]
    fn test_cli_requires_server_and_nick() {
        assert!(Args::try_parse_from(["crablet", "--nick", "crab"]).is_err());
        assert!(Args::try_parse_from(["crablet", "--server", "localhost"]).is_err());
    }
}
