//! Error types for the log bridge

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Inline source map payload is not valid base64
    #[error("Invalid base64 payload: {0}")]
    Base64Error(#[from] base64::DecodeError),

    /// Source map document with an unsupported version
    #[error("Invalid source map version: expected 3, got {0}")]
    InvalidSourceMapVersion(u32),

    /// Character outside the base64 VLQ alphabet
    #[error("Invalid VLQ character: {0}")]
    InvalidVlqChar(char),

    /// VLQ value needs more bits than a 64-bit integer holds
    #[error("VLQ value overflows in segment '{0}'")]
    VlqOverflow(String),

    /// Segment ends on a digit with the continuation bit set
    #[error("Truncated VLQ value in segment '{0}'")]
    TruncatedVlq(String),

    /// Mapping refers past the end of the `sources` array
    #[error("Invalid source index: {0}")]
    InvalidSourceIndex(u32),

    /// Source content could not be fetched
    #[error("Failed to fetch '{url}': {message}")]
    FetchError { url: String, message: String },

    /// Sink refused or failed to deliver an event
    #[error("Transport '{sink}' failed: {message}")]
    TransportError { sink: String, message: String },

    /// Logger name contains the reserved unit separator
    #[error("Invalid logger name {0:?}: must not contain U+001F")]
    InvalidLoggerName(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// No tokio runtime to run background resolution on
    #[error("No tokio runtime available; build the bridge inside a runtime or pass a handle")]
    NoRuntime,
}

impl LoggerError {
    /// Create a fetch error for a source URL
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FetchError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a transport error for a named sink
    pub fn transport(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}
