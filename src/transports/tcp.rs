//! TCP sink for a backend process listening on a socket
//!
//! Each delivery is written as one line of JSON (a [`SinkMessage`]).
//! The backend splits `text` on the first U+001F to recover the logger name.

use crate::core::{LogLevel, LogSink, LoggerError, ResolvedLocation, Result, SinkMessage};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Bound on connecting and on each write.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Newline-delimited JSON over TCP.
///
/// The connection is opened on the first delivery (or eagerly with
/// [`TcpSink::connect`]). The first failed connect or write is returned as
/// an error and closes the sink for good: later deliveries fail without
/// touching the network, and no reconnect is ever attempted.
///
/// # Example
///
/// ```no_run
/// use rust_log_bridge::transports::{TcpSink, TransportForwarder};
///
/// # async fn example() -> rust_log_bridge::core::Result<()> {
/// let sink = TcpSink::connect("127.0.0.1:7878").await?;
/// let forwarder = TransportForwarder::new(sink);
/// # Ok(())
/// # }
/// ```
pub struct TcpSink {
    address: String,
    state: Mutex<Connection>,
    io_timeout: Duration,
}

enum Connection {
    Idle,
    Open(TcpStream),
    Broken,
}

impl TcpSink {
    /// Create a sink that connects on first use.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            state: Mutex::new(Connection::Idle),
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Connect immediately.
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established within the timeout
    pub async fn connect(address: impl Into<String>) -> Result<Self> {
        let sink = Self::new(address);
        let stream = sink.open().await?;
        *sink.state.lock().await = Connection::Open(stream);
        Ok(sink)
    }

    #[must_use]
    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether an earlier connect or write failed.
    pub async fn is_broken(&self) -> bool {
        matches!(*self.state.lock().await, Connection::Broken)
    }

    async fn open(&self) -> Result<TcpStream> {
        let stream = timeout(self.io_timeout, TcpStream::connect(&self.address))
            .await
            .map_err(|_| self.error("connect timed out"))?
            .map_err(|e| self.error(format!("connect failed: {}", e)))?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }

    fn error(&self, message: impl Into<String>) -> LoggerError {
        LoggerError::transport(format!("tcp:{}", self.address), message)
    }
}

#[async_trait]
impl LogSink for TcpSink {
    async fn deliver(
        &self,
        level: LogLevel,
        text: &str,
        location: Option<&ResolvedLocation>,
    ) -> Result<()> {
        let mut line = serde_json::to_vec(&SinkMessage::new(level, text, location))?;
        line.push(b'\n');

        let mut state = self.state.lock().await;
        if matches!(*state, Connection::Idle) {
            match self.open().await {
                Ok(stream) => *state = Connection::Open(stream),
                Err(e) => {
                    *state = Connection::Broken;
                    return Err(e);
                }
            }
        }
        let Connection::Open(stream) = &mut *state else {
            return Err(self.error("connection closed after an earlier failure"));
        };

        let written = match timeout(self.io_timeout, stream.write_all(&line)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(self.error(format!("write failed: {}", e))),
            Err(_) => Err(self.error("write timed out")),
        };

        if written.is_err() {
            *state = Connection::Broken;
        }
        written
    }

    fn name(&self) -> &str {
        "tcp"
    }
}
