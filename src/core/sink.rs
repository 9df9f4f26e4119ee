//! Sink trait for the cross-process delivery boundary

use super::call_site::ResolvedLocation;
use super::error::Result;
use super::log_level::LogLevel;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One delivery as it crosses the boundary.
///
/// Serialized as a single JSON object by the stream sinks:
/// `{"level":"INFO","text":"Auth\u001fUser logged in","location":{"file":"src/auth.ts","line":42}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkMessage {
    pub level: LogLevel,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ResolvedLocation>,
}

impl SinkMessage {
    pub fn new(level: LogLevel, text: &str, location: Option<&ResolvedLocation>) -> Self {
        Self {
            level,
            text: text.to_string(),
            location: location.cloned(),
        }
    }
}

/// The per-level entry points of a delivery target.
///
/// Each entry point resolves on success and fails when the other side is
/// unavailable. Implementors provide [`deliver`](LogSink::deliver); the five
/// level methods route to it unless overridden.
///
/// # Example
///
/// ```no_run
/// use rust_log_bridge::core::{LogLevel, LogSink, ResolvedLocation, Result};
/// use async_trait::async_trait;
///
/// struct Stdout;
///
/// #[async_trait]
/// impl LogSink for Stdout {
///     async fn deliver(
///         &self,
///         level: LogLevel,
///         text: &str,
///         _location: Option<&ResolvedLocation>,
///     ) -> Result<()> {
///         println!("{} {}", level, text);
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "stdout"
///     }
/// }
/// ```
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn deliver(
        &self,
        level: LogLevel,
        text: &str,
        location: Option<&ResolvedLocation>,
    ) -> Result<()>;

    async fn trace(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        self.deliver(LogLevel::Trace, text, location).await
    }

    async fn debug(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        self.deliver(LogLevel::Debug, text, location).await
    }

    async fn info(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        self.deliver(LogLevel::Info, text, location).await
    }

    async fn warn(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        self.deliver(LogLevel::Warn, text, location).await
    }

    async fn error(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        self.deliver(LogLevel::Error, text, location).await
    }

    fn name(&self) -> &str;
}

#[async_trait]
impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    async fn deliver(
        &self,
        level: LogLevel,
        text: &str,
        location: Option<&ResolvedLocation>,
    ) -> Result<()> {
        (**self).deliver(level, text, location).await
    }

    async fn trace(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        (**self).trace(text, location).await
    }

    async fn debug(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        (**self).debug(text, location).await
    }

    async fn info(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        (**self).info(text, location).await
    }

    async fn warn(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        (**self).warn(text, location).await
    }

    async fn error(&self, text: &str, location: Option<&ResolvedLocation>) -> Result<()> {
        (**self).error(text, location).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
