//! Transport trait for dispatching composed events

use super::error::LoggerError;
use super::log_event::LogEvent;
use async_trait::async_trait;

/// What happened to one event at a transport.
#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered,
    /// The transport is disabled and did not attempt delivery.
    Skipped,
    Failed(LoggerError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Receives every event a bridge emits.
///
/// `handle` never returns an error to the caller; failures are reported
/// through the outcome.
///
/// # Example
///
/// ```no_run
/// use rust_log_bridge::core::{DeliveryOutcome, LogEvent, Transport};
/// use async_trait::async_trait;
///
/// struct Discard;
///
/// #[async_trait]
/// impl Transport for Discard {
///     async fn handle(&self, _event: &LogEvent) -> DeliveryOutcome {
///         DeliveryOutcome::Delivered
///     }
///
///     fn name(&self) -> &str {
///         "discard"
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    async fn handle(&self, event: &LogEvent) -> DeliveryOutcome;

    fn name(&self) -> &str;
}
