//! # Rust Log Bridge
//!
//! Client-side logging that crosses a process boundary. Each log call records
//! where it was made, formats its message, and forwards
//! `"<logger>\u{1F}<message>"` plus an optional `{file, line}` to a backend
//! sink in a background task.
//!
//! ## Features
//!
//! - **Caller location**: the first stack frame outside the logging
//!   infrastructure, in V8, Firefox/Safari or native backtrace form
//! - **Source maps**: bundled locations translated back through inline
//!   base64 source maps, fetched and cached once per file
//! - **Fire and forget**: log calls never block on resolution or delivery
//!   and never report failures to the caller
//! - **Fail-off transports**: a forwarder disables itself for good after its
//!   first failed delivery
//!
//! ## Example
//!
//! ```
//! use rust_log_bridge::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let (sink, receiver) = ChannelSink::new();
//! let bridge = LogBridge::builder()
//!     .config(BridgeConfig::default())
//!     .forward_to(sink)
//!     .build()
//!     .unwrap();
//!
//! let auth = bridge.create_logger("Auth").unwrap();
//! auth.info("User logged in", &[&42]);
//!
//! bridge.flush(std::time::Duration::from_secs(1)).await;
//! let message = receiver.recv().unwrap();
//! assert_eq!(message.text, "Auth\u{1F}User logged in 42");
//! # });
//! ```

pub mod core;
pub mod macros;
pub mod source_map;
pub mod transports;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::transports::ConsoleSink;
    pub use crate::transports::{ChannelSink, TcpSink, TransportForwarder};
    pub use crate::core::{
        BridgeConfig, BridgeMetrics, DeliveryOutcome, LogBridge, LogBridgeBuilder, LogEvent,
        LogLevel, LogSink, LogValue, Logger, LoggerError, ResolvedLocation, Result, SinkMessage,
        Transport,
    };
}

#[cfg(feature = "console")]
pub use crate::transports::ConsoleSink;
pub use crate::transports::{ChannelSink, TcpSink, TransportForwarder};
pub use crate::core::{
    format_message, parse_line, split_wire_message, BacktraceCapture, BridgeConfig, BridgeMetrics,
    CallerLocator, DeliveryOutcome, FixedCapture, FrameFilter, LogBridge, LogBridgeBuilder,
    LogEvent, LogLevel, LogSink, LogValue, Logger, LoggerError, RawCallSite, ResolvedLocation,
    Result, SinkMessage, StackCapture, Transport,
};
pub use crate::source_map::{SourceFetcher, SourceMapCache, SourceMapResolver};
