//! Logger facade and the bridge that owns the pipeline

use super::{
    call_site::{RawCallSite, ResolvedLocation},
    capture::{BacktraceCapture, CallerLocator, StackCapture},
    config::BridgeConfig,
    error::{LoggerError, Result},
    log_event::{compose_wire_message, validate_logger_name, LogEvent},
    log_level::LogLevel,
    message::{format_message, LogValue},
    metrics::BridgeMetrics,
    sink::LogSink,
    transport::{DeliveryOutcome, Transport},
};
use crate::source_map::{DefaultFetcher, SourceFetcher, SourceMapCache, SourceMapResolver};
use crate::transports::TransportForwarder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::Notify;

struct BridgeInner {
    config: BridgeConfig,
    locator: CallerLocator,
    resolver: Option<SourceMapResolver>,
    transports: Vec<Arc<dyn Transport>>,
    runtime: Handle,
    metrics: Arc<BridgeMetrics>,
    in_flight: AtomicUsize,
    idle: Notify,
}

/// Decrements the in-flight count when a background task ends, however it ends.
struct InFlightGuard(Arc<BridgeInner>);

impl InFlightGuard {
    fn enter(inner: &Arc<BridgeInner>) -> Self {
        inner.in_flight.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(inner))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.in_flight.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Owns the caller locator, source map resolver and transports, and hands
/// out named [`Logger`]s.
///
/// Cloning is cheap; clones share the same pipeline and metrics.
///
/// # Example
///
/// ```
/// use rust_log_bridge::prelude::*;
///
/// # tokio_test::block_on(async {
/// let (sink, receiver) = ChannelSink::new();
/// let bridge = LogBridge::builder().forward_to(sink).build().unwrap();
///
/// let logger = bridge.create_logger("Auth").unwrap();
/// logger.info("User logged in", &[]);
///
/// assert!(bridge.flush(std::time::Duration::from_secs(1)).await);
/// assert_eq!(receiver.recv().unwrap().text, "Auth\u{1F}User logged in");
/// # });
/// ```
#[derive(Clone)]
pub struct LogBridge {
    inner: Arc<BridgeInner>,
}

impl LogBridge {
    #[must_use]
    pub fn builder() -> LogBridgeBuilder {
        LogBridgeBuilder::new()
    }

    /// Create a named logger.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidLoggerName`] if `name` contains U+001F,
    /// which would make the wire message ambiguous.
    pub fn create_logger(&self, name: &str) -> Result<Logger> {
        validate_logger_name(name)?;
        Ok(Logger {
            name: Arc::from(name),
            inner: Arc::clone(&self.inner),
        })
    }

    /// Wait for every event emitted so far to finish resolving and delivering.
    ///
    /// Returns `true` if the pipeline drained within `timeout`, `false` if
    /// events were still in flight when it expired.
    pub async fn flush(&self, timeout: Duration) -> bool {
        let drained = async {
            loop {
                let idle = self.inner.idle.notified();
                tokio::pin!(idle);
                idle.as_mut().enable();
                if self.inner.in_flight.load(Ordering::Acquire) == 0 {
                    return;
                }
                idle.await;
            }
        };

        tokio::time::timeout(timeout, drained).await.is_ok()
    }

    /// [`flush`](Self::flush) with the configured `flush_timeout_ms`.
    pub async fn flush_default(&self) -> bool {
        self.flush(self.inner.config.flush_timeout()).await
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    pub fn metrics(&self) -> &BridgeMetrics {
        &self.inner.metrics
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    pub fn transport_count(&self) -> usize {
        self.inner.transports.len()
    }
}

impl std::fmt::Debug for LogBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let transports: Vec<&str> = self.inner.transports.iter().map(|t| t.name()).collect();
        f.debug_struct("LogBridge")
            .field("config", &self.inner.config)
            .field("transports", &transports)
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}

/// Named logging handle.
///
/// Every call returns immediately. The caller's location is captured on the
/// calling thread; source map resolution and delivery run in a background
/// task whose failures never reach the caller. Events from separate calls
/// may arrive at a sink in any order.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    inner: Arc<BridgeInner>,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log(&self, level: LogLevel, message: &str, args: &[&dyn LogValue]) {
        let inner = &self.inner;
        inner.metrics.record_emitted();

        let raw = if inner.config.capture_location {
            let raw = inner.locator.locate();
            if raw.is_some() {
                inner.metrics.record_located();
            } else {
                inner.metrics.record_unlocated();
            }
            raw
        } else {
            None
        };

        let text = format_message(message, args);
        let event = LogEvent::new(&*self.name, level, compose_wire_message(&self.name, &text));

        let guard = InFlightGuard::enter(inner);
        inner.runtime.spawn(async move {
            let inner = Arc::clone(&guard.0);
            let location = match raw {
                Some(raw) => Some(resolve(&inner, &raw).await),
                None => None,
            };
            dispatch(&inner, event.with_location(location)).await;
            drop(guard);
        });
    }

    pub fn trace(&self, message: &str, args: &[&dyn LogValue]) {
        self.log(LogLevel::Trace, message, args);
    }

    pub fn debug(&self, message: &str, args: &[&dyn LogValue]) {
        self.log(LogLevel::Debug, message, args);
    }

    pub fn info(&self, message: &str, args: &[&dyn LogValue]) {
        self.log(LogLevel::Info, message, args);
    }

    pub fn warn(&self, message: &str, args: &[&dyn LogValue]) {
        self.log(LogLevel::Warn, message, args);
    }

    pub fn error(&self, message: &str, args: &[&dyn LogValue]) {
        self.log(LogLevel::Error, message, args);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish()
    }
}

async fn resolve(inner: &BridgeInner, raw: &RawCallSite) -> ResolvedLocation {
    let Some(resolver) = &inner.resolver else {
        return ResolvedLocation::from(raw);
    };

    let resolution = resolver.resolve_detailed(raw).await;
    if resolution.is_mapped() {
        inner.metrics.record_source_mapped();
    }
    resolution.into_location()
}

async fn dispatch(inner: &BridgeInner, event: LogEvent) {
    for transport in &inner.transports {
        match transport.handle(&event).await {
            DeliveryOutcome::Delivered => inner.metrics.record_delivered(),
            DeliveryOutcome::Skipped => inner.metrics.record_skipped(),
            DeliveryOutcome::Failed(_) => inner.metrics.record_failed(),
        };
    }
}

/// Builder for constructing a [`LogBridge`] with a fluent API
///
/// # Example
///
/// ```no_run
/// use rust_log_bridge::prelude::*;
///
/// # async fn example() -> rust_log_bridge::Result<()> {
/// let bridge = LogBridge::builder()
///     .config(BridgeConfig::from_env()?)
///     .forward_to(TcpSink::new("127.0.0.1:7878"))
///     .forward_to(ConsoleSink::new())
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct LogBridgeBuilder {
    config: BridgeConfig,
    transports: Vec<Arc<dyn Transport>>,
    capture: Option<Arc<dyn StackCapture>>,
    fetcher: Option<Arc<dyn SourceFetcher>>,
    cache: Option<Arc<SourceMapCache>>,
    runtime: Option<Handle>,
}

impl LogBridgeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: BridgeConfig::default(),
            transports: Vec::new(),
            capture: None,
            fetcher: None,
            cache: None,
            runtime: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a transport. Every event is handed to every transport.
    #[must_use]
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transports.push(Arc::new(transport));
        self
    }

    /// Add a transport the caller keeps a handle to, e.g. to watch its latch.
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Forward events to `sink` through a [`TransportForwarder`].
    #[must_use]
    pub fn forward_to<S: LogSink + 'static>(self, sink: S) -> Self {
        self.transport(TransportForwarder::new(sink))
    }

    /// Replace the native stack capture.
    #[must_use]
    pub fn capture<C: StackCapture + 'static>(mut self, capture: C) -> Self {
        self.capture = Some(Arc::new(capture));
        self
    }

    /// Replace the source fetcher used to load generated code.
    #[must_use]
    pub fn fetcher<F: SourceFetcher + 'static>(mut self, fetcher: F) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Share a source map cache between bridges.
    #[must_use]
    pub fn cache(mut self, cache: Arc<SourceMapCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Run background tasks on `runtime` instead of the current one.
    #[must_use]
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// # Errors
    ///
    /// Returns error if the configuration is invalid, or if no runtime was
    /// given and the builder is not called from within one.
    pub fn build(self) -> Result<LogBridge> {
        self.config.validate()?;

        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|_| LoggerError::NoRuntime)?,
        };

        let capture = self
            .capture
            .unwrap_or_else(|| Arc::new(BacktraceCapture::new()));
        let locator = CallerLocator::new(capture, self.config.frame_filter());

        let resolver = if self.config.resolve_source_maps {
            let cache = self.cache.unwrap_or_default();
            let fetcher = self
                .fetcher
                .unwrap_or_else(|| Arc::new(DefaultFetcher::new()));
            Some(SourceMapResolver::new(cache, fetcher))
        } else {
            None
        };

        Ok(LogBridge {
            inner: Arc::new(BridgeInner {
                config: self.config,
                locator,
                resolver,
                transports: self.transports,
                runtime,
                metrics: Arc::new(BridgeMetrics::new()),
                in_flight: AtomicUsize::new(0),
                idle: Notify::new(),
            }),
        })
    }
}

impl Default for LogBridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
