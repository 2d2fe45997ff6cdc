//! Session controller: handshake plus the two concurrent loops.
//!
//! The receive loop runs as its own task, reading the socket, framing lines
//! and acting on each dispatch [`Effect`]. The input loop runs on the caller's
//! task and turns local input into commands or channel messages. The loops
//! share only the [`LineWriter`] and a [`CancellationToken`] that stands for
//! "running": whichever loop stops first cancels it and the other follows.

use crate::config::{AppConfig, ServerConfig};
use crate::error::Result;
use crate::irc::commands::{parse_command, ParsedCommand};
use crate::irc::connection::{self, LineWriter};
use crate::irc::dispatch::{dispatch, Effect};
use crate::irc::encoder::Command;
use crate::irc::framer::LineFramer;
use crate::ui::Presenter;
use chrono::Local;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::net::tcp::OwnedReadHalf;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Size of a single socket read.
const READ_CHUNK: usize = 4096;
const FALLBACK_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

pub struct Session {
    server: ServerConfig,
    channel: Option<String>,
    writer: Arc<LineWriter>,
    presenter: Arc<dyn Presenter>,
    running: CancellationToken,
    timestamp_format: String,
    quit_message: String,
}

enum Flow {
    Continue,
    Stop,
}

impl Session {
    /// Connect, register and join the startup channel if one was given.
    ///
    /// Returns the session and the read half for [`Session::run`]. Connect
    /// failures are fatal and not retried.
    pub async fn connect(
        server: ServerConfig,
        config: &AppConfig,
        presenter: Arc<dyn Presenter>,
    ) -> Result<(Self, OwnedReadHalf)> {
        let (reader, writer) = connection::connect(&server.host, server.port).await?;
        let session = Self::new(server, config, writer, presenter);
        session.register().await?;
        Ok((session, reader))
    }

    pub fn new(
        server: ServerConfig,
        config: &AppConfig,
        writer: LineWriter,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            channel: server.channel.clone(),
            server,
            writer: Arc::new(writer),
            presenter,
            running: CancellationToken::new(),
            timestamp_format: config.ui.timestamp_format.clone(),
            quit_message: config.behavior.quit_message.clone(),
        }
    }

    /// Send `NICK`, `USER` and the optional startup `JOIN` without waiting
    /// for the server to acknowledge anything.
    pub async fn register(&self) -> Result<()> {
        self.writer
            .send(&Command::Nick(self.server.nickname.clone()))
            .await?;
        self.writer
            .send(&Command::User(self.server.username.clone()))
            .await?;
        if let Some(channel) = &self.channel {
            self.writer.send(&Command::Join(channel.clone())).await?;
        }
        tracing::debug!(nick = %self.server.nickname, channel = ?self.channel, "registered");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        !self.running.is_cancelled()
    }

    pub fn current_channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    /// Run both loops until `/quit`, end of input or connection loss.
    ///
    /// Mid-session I/O failures end the loop that hit them and are never
    /// returned. Shutdown waits for the receive loop to finish.
    pub async fn run<R>(&mut self, reader: R, mut input: mpsc::UnboundedReceiver<String>)
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let receiver = ReceiveLoop {
            writer: Arc::clone(&self.writer),
            presenter: Arc::clone(&self.presenter),
            running: self.running.clone(),
            timestamp_format: self.timestamp_format.clone(),
        };
        let handle = tokio::spawn(receiver.run(reader));

        self.input_loop(&mut input).await;

        self.running.cancel();
        self.writer.close().await;
        if let Err(e) = handle.await {
            tracing::warn!(error = %e, "receive loop did not finish cleanly");
        }
    }

    async fn input_loop(&mut self, input: &mut mpsc::UnboundedReceiver<String>) {
        loop {
            let line = tokio::select! {
                _ = self.running.cancelled() => break,
                line = input.recv() => match line {
                    Some(line) => line,
                    None => {
                        tracing::debug!("end of input");
                        break;
                    }
                },
            };

            match self.handle_input(&line).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "input loop stopped");
                    break;
                }
            }
        }
        self.running.cancel();
    }

    async fn handle_input(&mut self, line: &str) -> Result<Flow> {
        let Some(command) = parse_command(line) else {
            match &self.channel {
                Some(channel) => {
                    self.writer
                        .send(&Command::Privmsg {
                            target: channel.clone(),
                            text: line.to_string(),
                        })
                        .await?
                }
                None => tracing::debug!("no channel joined, input dropped"),
            }
            return Ok(Flow::Continue);
        };

        match command {
            ParsedCommand::Join { channel } => {
                self.channel = Some(channel.clone());
                self.writer.send(&Command::Join(channel)).await?;
            }
            ParsedCommand::Quit => {
                self.writer
                    .send(&Command::Quit(self.quit_message.clone()))
                    .await?;
                self.running.cancel();
                self.writer.close().await;
                return Ok(Flow::Stop);
            }
            ParsedCommand::Ignored => {}
            ParsedCommand::Unknown { name } => {
                tracing::debug!(%name, "unknown command");
                self.presenter
                    .display_error(&timestamp(&self.timestamp_format), "Unknown command");
            }
        }
        Ok(Flow::Continue)
    }
}

/// Everything the receive task needs, cloned out of the session.
struct ReceiveLoop {
    writer: Arc<LineWriter>,
    presenter: Arc<dyn Presenter>,
    running: CancellationToken,
    timestamp_format: String,
}

impl ReceiveLoop {
    async fn run<R>(self, mut reader: R)
    where
        R: AsyncRead + Unpin,
    {
        let mut framer = LineFramer::new();
        let mut chunk = vec![0u8; READ_CHUNK];

        loop {
            let n = tokio::select! {
                _ = self.running.cancelled() => break,
                read = reader.read(&mut chunk) => match read {
                    Ok(0) => {
                        tracing::info!("server closed the connection");
                        break;
                    }
                    Ok(n) => n,
                    Err(e) => {
                        tracing::warn!(error = %e, "socket read failed");
                        break;
                    }
                },
            };

            if let Err(e) = self.handle_lines(framer.feed(&chunk[..n])).await {
                tracing::debug!(error = %e, "receive loop stopped");
                break;
            }
        }
        if !framer.pending().is_empty() {
            tracing::debug!(bytes = framer.pending().len(), "discarding unterminated line");
        }
        self.running.cancel();
    }

    async fn handle_lines(&self, lines: Vec<String>) -> Result<()> {
        for line in lines {
            tracing::trace!(%line, "received");
            match dispatch(&line) {
                Effect::ReplyPong { payload } => {
                    self.writer.send(&Command::Pong(payload)).await?;
                }
                Effect::DeliverMessage {
                    sender,
                    target,
                    text,
                } => {
                    tracing::trace!(%sender, %target, "message");
                    self.presenter
                        .display_message(&timestamp(&self.timestamp_format), &sender, &text);
                }
                Effect::DisplayInfo { line } => {
                    self.presenter
                        .display_info(&timestamp(&self.timestamp_format), &line);
                }
            }
        }
        Ok(())
    }
}

/// Current wall-clock time in `format`, falling back to `HH:MM:SS` when the
/// configured format is not valid strftime.
fn timestamp(format: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_err() {
        out = now.format(FALLBACK_TIMESTAMP_FORMAT).to_string();
    }
    out
}
