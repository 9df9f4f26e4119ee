//! Logging macros for passing trailing values without building the slice by hand.
//!
//! Every trailing argument must implement [`LogValue`](crate::LogValue), i.e.
//! `Serialize + Debug`. Strings are appended verbatim, other values as
//! pretty-printed JSON.
//!
//! # Examples
//!
//! ```
//! use rust_log_bridge::prelude::*;
//! use rust_log_bridge::info;
//!
//! # tokio_test::block_on(async {
//! let (sink, receiver) = ChannelSink::new();
//! let bridge = LogBridge::builder().forward_to(sink).build().unwrap();
//! let logger = bridge.create_logger("Server").unwrap();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With trailing values
//! let port = 8080;
//! info!(logger, "Listening on port", port);
//! # bridge.flush(std::time::Duration::from_secs(1)).await;
//! # assert_eq!(receiver.len(), 2);
//! # });
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # tokio_test::block_on(async {
/// # let bridge = LogBridge::builder().build().unwrap();
/// # let logger = bridge.create_logger("Db").unwrap();
/// use rust_log_bridge::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code:", 500);
/// # });
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $message:expr $(, $arg:expr)* $(,)?) => {
        $logger.log(
            $level,
            &$message,
            &[$(&($arg) as &dyn $crate::LogValue),*],
        )
    };
}

/// Log a trace-level message.
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # tokio_test::block_on(async {
/// # let bridge = LogBridge::builder().build().unwrap();
/// # let logger = bridge.create_logger("Calc").unwrap();
/// use rust_log_bridge::trace;
/// trace!(logger, "Entering calculate()");
/// trace!(logger, "Variable value:", 42);
/// # });
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_log_bridge::prelude::*;
/// # tokio_test::block_on(async {
/// # let bridge = LogBridge::builder().build().unwrap();
/// # let logger = bridge.create_logger("Db").unwrap();
/// use rust_log_bridge::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code:", 500, "Internal error");
/// # });
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
