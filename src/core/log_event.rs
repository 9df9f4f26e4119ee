//! Log event structure and the wire encoding shared with the backend

use super::call_site::ResolvedLocation;
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit Separator, the delimiter between logger name and message on the wire.
pub const SEP: char = '\x1F';

/// Check that a logger name can be split back out of a wire message.
pub fn validate_logger_name(name: &str) -> Result<()> {
    if name.contains(SEP) {
        return Err(LoggerError::InvalidLoggerName(name.to_string()));
    }
    Ok(())
}

/// Build the wire message `"{name}\u{1F}{text}"`.
pub fn compose_wire_message(name: &str, text: &str) -> String {
    let mut wire = String::with_capacity(name.len() + text.len() + 1);
    wire.push_str(name);
    wire.push(SEP);
    wire.push_str(text);
    wire
}

/// Split a wire message into `(logger_name, message)` on the first separator.
///
/// Returns `None` for messages that did not come through a named logger.
///
/// # Examples
///
/// ```
/// use rust_log_bridge::core::log_event::split_wire_message;
///
/// assert_eq!(split_wire_message("Auth\u{1F}a\u{1F}b"), Some(("Auth", "a\u{1F}b")));
/// assert_eq!(split_wire_message("plain"), None);
/// ```
pub fn split_wire_message(raw: &str) -> Option<(&str, &str)> {
    raw.split_once(SEP)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub logger_name: String,
    pub level: LogLevel,
    /// Wire-format text, logger name included.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ResolvedLocation>,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    /// Create an event from an already-composed wire message.
    pub fn new(logger_name: impl Into<String>, level: LogLevel, message: String) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message,
            location: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_location(mut self, location: Option<ResolvedLocation>) -> Self {
        self.location = location;
        self
    }

    /// The formatted text without the logger name prefix.
    pub fn text(&self) -> &str {
        split_wire_message(&self.message)
            .map(|(_, text)| text)
            .unwrap_or(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_and_split() {
        let wire = compose_wire_message("Auth", "User logged in");
        assert_eq!(wire, "Auth\u{1F}User logged in");
        assert_eq!(split_wire_message(&wire), Some(("Auth", "User logged in")));
    }

    #[test]
    fn test_split_keeps_separators_in_message() {
        let wire = compose_wire_message("Net", "raw \u{1F} bytes");
        assert_eq!(split_wire_message(&wire), Some(("Net", "raw \u{1F} bytes")));
    }

    #[test]
    fn test_validate_logger_name() {
        assert!(validate_logger_name("Startup").is_ok());
        assert!(validate_logger_name("").is_ok());
        assert!(matches!(
            validate_logger_name("bad\u{1F}name"),
            Err(LoggerError::InvalidLoggerName(_))
        ));
    }

    #[test]
    fn test_event_text_and_location() {
        let event = LogEvent::new("Auth", LogLevel::Info, compose_wire_message("Auth", "hi"))
            .with_location(Some(ResolvedLocation::new("src/auth.ts", 42)));
        assert_eq!(event.text(), "hi");
        assert_eq!(event.location.as_ref().map(|l| l.line), Some(42));
    }

    #[test]
    fn test_event_serialization_omits_missing_location() {
        let event = LogEvent::new("Auth", LogLevel::Warn, compose_wire_message("Auth", "x"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["level"], "WARN");
        assert_eq!(json["message"], "Auth\u{1F}x");
        assert!(json.get("location").is_none());
    }
}
