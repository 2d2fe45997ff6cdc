use crate::error::{ClientError, Result};
use crate::irc::encoder::{encode, Command};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::Mutex;

type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Write side of the connection, shared by the receive loop (PONG replies)
/// and the input loop (everything else).
///
/// Each send holds the lock across `write_all` and `flush`, so two lines
/// can never interleave on the wire. Once closed, sends fail with
/// [`ClientError::Closed`].
pub struct LineWriter {
    inner: Mutex<Option<BoxedWriter>>,
}

impl LineWriter {
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            inner: Mutex::new(Some(Box::new(writer))),
        }
    }

    pub async fn send(&self, command: &Command) -> Result<()> {
        let line = command.to_string();
        let mut guard = self.inner.lock().await;
        let writer = guard.as_mut().ok_or(ClientError::Closed)?;
        writer.write_all(&encode(&line)).await?;
        writer.flush().await?;
        tracing::trace!(%line, "sent");
        Ok(())
    }

    /// Shut the write half down. Idempotent.
    pub async fn close(&self) {
        if let Some(mut writer) = self.inner.lock().await.take() {
            if let Err(e) = writer.shutdown().await {
                tracing::debug!(error = %e, "shutdown of write half failed");
            }
        }
    }

    #[cfg(test)]
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

/// Open the TCP connection and split it into the read half (owned by the
/// receive loop) and the shared [`LineWriter`].
pub async fn connect(host: &str, port: u16) -> Result<(OwnedReadHalf, LineWriter)> {
    let addr = format!("{}:{}", host, port);
    let stream = TcpStream::connect(&addr)
        .await
        .map_err(|source| ClientError::Connect {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(%addr, "connected");

    let (reader, writer) = stream.into_split();
    Ok((reader, LineWriter::new(writer)))
}
