//! Channel sink handing events to a consumer on another thread

use crate::core::{LogLevel, LogSink, LoggerError, ResolvedLocation, Result, SinkMessage};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Sends each delivery into an unbounded crossbeam channel.
///
/// The receiving side is typically the thread that owns the real
/// inter-process connection. Delivery fails once every receiver is dropped.
///
/// # Example
///
/// ```
/// use rust_log_bridge::transports::ChannelSink;
/// use rust_log_bridge::core::{LogLevel, LogSink};
///
/// # tokio_test::block_on(async {
/// let (sink, receiver) = ChannelSink::new();
/// sink.info("Auth\u{1F}ready", None).await.unwrap();
///
/// let message = receiver.recv().unwrap();
/// assert_eq!(message.level, LogLevel::Info);
/// assert_eq!(message.text, "Auth\u{1F}ready");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<SinkMessage>,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<SinkMessage>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: Sender<SinkMessage>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl LogSink for ChannelSink {
    async fn deliver(
        &self,
        level: LogLevel,
        text: &str,
        location: Option<&ResolvedLocation>,
    ) -> Result<()> {
        self.sender
            .send(SinkMessage::new(level, text, location))
            .map_err(|_| LoggerError::transport("channel", "receiver disconnected"))
    }

    fn name(&self) -> &str {
        "channel"
    }
}
