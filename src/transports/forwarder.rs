//! Transport that forwards events to a sink and latches off on failure

use crate::core::{DeliveryOutcome, LogEvent, LogLevel, LogSink, Transport};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// Forwards each event to the level-appropriate entry point of a [`LogSink`].
///
/// The first failed delivery disables the forwarder for the rest of its
/// lifetime: a failure means the other side of the boundary is not there,
/// so later events are dropped without touching the sink. There is no retry
/// and no way to re-enable it.
///
/// # Example
///
/// ```
/// use rust_log_bridge::transports::{ChannelSink, TransportForwarder};
///
/// let (sink, receiver) = ChannelSink::new();
/// let forwarder = TransportForwarder::new(sink);
/// assert!(!forwarder.is_disabled());
/// # drop(receiver);
/// ```
pub struct TransportForwarder<S> {
    sink: S,
    disabled: AtomicBool,
    name: String,
}

impl<S: LogSink> TransportForwarder<S> {
    pub fn new(sink: S) -> Self {
        let name = format!("forwarder:{}", sink.name());
        Self {
            sink,
            disabled: AtomicBool::new(false),
            name,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Acquire)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn disable(&self, error: &crate::core::LoggerError) {
        if !self.disabled.swap(true, Ordering::AcqRel) {
            eprintln!(
                "[LOG BRIDGE WARNING] {} disabled after delivery failure: {}. \
                 Further events from this transport are dropped.",
                self.name, error
            );
        }
    }
}

#[async_trait]
impl<S: LogSink> Transport for TransportForwarder<S> {
    async fn handle(&self, event: &LogEvent) -> DeliveryOutcome {
        if self.is_disabled() {
            return DeliveryOutcome::Skipped;
        }

        let text = event.message.as_str();
        let location = event.location.as_ref();
        let result = match event.level.sink_level() {
            LogLevel::Trace => self.sink.trace(text, location).await,
            LogLevel::Debug => self.sink.debug(text, location).await,
            LogLevel::Info => self.sink.info(text, location).await,
            LogLevel::Warn => self.sink.warn(text, location).await,
            LogLevel::Error | LogLevel::Fatal => self.sink.error(text, location).await,
        };

        match result {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => {
                self.disable(&e);
                DeliveryOutcome::Failed(e)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
