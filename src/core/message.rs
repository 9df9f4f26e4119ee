//! Message formatting for variadic log arguments

use serde::Serialize;
use std::fmt::Debug;

/// A value that can be appended to a log message.
///
/// Implemented for every `Serialize + Debug` type. Values that serialize to a
/// JSON string are rendered verbatim, everything else as pretty-printed JSON,
/// and values whose serialization fails fall back to their `Debug` text.
pub trait LogValue: Debug {
    fn render(&self) -> String;
}

impl<T: Serialize + Debug> LogValue for T {
    fn render(&self) -> String {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(s)) => s,
            Ok(value) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| format!("{:?}", self))
            }
            Err(_) => format!("{:?}", self),
        }
    }
}

/// Join `message` and the rendered `args` with single spaces.
///
/// # Examples
///
/// ```
/// use rust_log_bridge::core::message::format_message;
///
/// assert_eq!(format_message("count:", &[&42]), "count: 42");
/// assert_eq!(format_message("msg", &[]), "msg");
/// ```
pub fn format_message(message: &str, args: &[&dyn LogValue]) -> String {
    if args.is_empty() {
        return message.to_string();
    }

    let rendered: Vec<String> = args.iter().map(|arg| arg.render()).collect();
    format!("{} {}", message, rendered.join(" "))
}
