//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - Every event is accounted for when many loggers emit at once
//! - The fail-off latch holds under concurrent delivery
//! - A shared source map cache settles on one entry per URL

use async_trait::async_trait;
use rust_log_bridge::core::{LogLevel, LogSink, LoggerError, ResolvedLocation, Result};
use rust_log_bridge::prelude::*;
use rust_log_bridge::source_map::SourceFetcher;
use rust_log_bridge::{FixedCapture, SourceMapCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(30);

/// Accepts the first `capacity` deliveries, then fails every call.
struct FlakySink {
    capacity: usize,
    calls: AtomicUsize,
}

impl FlakySink {
    fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LogSink for FlakySink {
    async fn deliver(
        &self,
        _level: LogLevel,
        _text: &str,
        _location: Option<&ResolvedLocation>,
    ) -> Result<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if call < self.capacity {
            Ok(())
        } else {
            Err(LoggerError::transport("flaky", "backend went away"))
        }
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Slow fetcher counting how often bundles are requested.
struct CountingFetcher {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl SourceFetcher for CountingFetcher {
    async fn fetch(&self, _url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(String::new())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_loggers_all_accounted() {
    let (sink, receiver) = ChannelSink::new();
    let bridge = LogBridge::builder()
        .capture(FixedCapture::new(""))
        .forward_to(sink)
        .build()
        .expect("Failed to build bridge");

    let mut handles = Vec::new();
    for worker in 0..8 {
        let logger = bridge
            .create_logger(&format!("Worker{}", worker))
            .expect("Failed to create logger");
        handles.push(tokio::spawn(async move {
            for i in 0..250 {
                logger.info("tick", &[&i]);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(bridge.flush(TIMEOUT).await);
    assert_eq!(receiver.len(), 2000);
    assert_eq!(bridge.metrics().emitted(), 2000);
    assert_eq!(bridge.metrics().delivered(), 2000);
    assert_eq!(bridge.in_flight(), 0);

    let worker3 = receiver
        .try_iter()
        .filter(|m| m.text.starts_with("Worker3\u{1F}tick "))
        .count();
    assert_eq!(worker3, 250);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_latch_holds_under_load() {
    let sink = FlakySink::new(100);
    let forwarder = Arc::new(TransportForwarder::new(sink.clone()));
    let bridge = LogBridge::builder()
        .capture(FixedCapture::new(""))
        .shared_transport(forwarder.clone())
        .build()
        .unwrap();
    let logger = bridge.create_logger("Load").unwrap();

    for i in 0..1000 {
        logger.warn("burst", &[&i]);
    }
    assert!(bridge.flush(TIMEOUT).await);

    let metrics = bridge.metrics();
    assert!(forwarder.is_disabled());
    assert_eq!(metrics.delivered() as usize, 100);
    assert!(metrics.failed() >= 1);
    assert_eq!(metrics.delivered() + metrics.failed() + metrics.skipped(), 1000);
    assert_eq!(sink.calls() as u64, metrics.delivered() + metrics.failed());

    // once latched and drained, nothing reaches the sink again
    let calls_after_latch = sink.calls();
    for i in 0..100 {
        logger.error("after", &[&i]);
    }
    assert!(bridge.flush(TIMEOUT).await);
    assert_eq!(sink.calls(), calls_after_latch);
    assert_eq!(metrics.skipped() + metrics.failed() + metrics.delivered(), 1100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_cache_one_entry_per_url() {
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = Arc::new(SourceMapCache::new());
    let stack = "    at a (http://localhost:1420/assets/a.js:1:1)";
    let bridge = LogBridge::builder()
        .capture(FixedCapture::new(stack))
        .fetcher(CountingFetcher {
            calls: calls.clone(),
        })
        .cache(cache.clone())
        .build()
        .unwrap();
    let logger = bridge.create_logger("Cache").unwrap();

    for _ in 0..200 {
        logger.debug("same url", &[]);
    }
    assert!(bridge.flush(TIMEOUT).await);

    assert_eq!(bridge.metrics().located(), 200);
    assert_eq!(bridge.metrics().source_mapped(), 0);
    assert_eq!(cache.len(), 1);

    // concurrent misses may race, but a settled entry is never fetched again
    let settled = calls.load(Ordering::SeqCst);
    assert!(settled >= 1);
    logger.debug("cached", &[]);
    assert!(bridge.flush(TIMEOUT).await);
    assert_eq!(calls.load(Ordering::SeqCst), settled);
}
