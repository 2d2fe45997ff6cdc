//! Typed errors for the connection and session layer.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The initial TCP connect failed. Fatal, never retried.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// A write was attempted after the session shut the socket down.
    #[error("connection closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
