//! Core bridge types and traits

pub mod call_site;
pub mod capture;
pub mod config;
pub mod error;
pub mod frame_filter;
pub mod log_event;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod sink;
pub mod transport;

pub use call_site::{parse_line, strip_origin, RawCallSite, ResolvedLocation};
pub use capture::{
    BacktraceCapture, CallerLocator, FixedCapture, StackCapture, DEFAULT_CALLER_FRAMES,
};
pub use config::{BridgeConfig, DEFAULT_FLUSH_TIMEOUT};
pub use error::{LoggerError, Result};
pub use frame_filter::{is_internal_frame, FrameFilter, INTERNAL_MARKERS};
pub use log_event::{compose_wire_message, split_wire_message, validate_logger_name, LogEvent, SEP};
pub use log_level::LogLevel;
pub use logger::{LogBridge, LogBridgeBuilder, Logger};
pub use message::{format_message, LogValue};
pub use metrics::BridgeMetrics;
pub use sink::{LogSink, SinkMessage};
pub use transport::{DeliveryOutcome, Transport};
