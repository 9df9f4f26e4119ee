//! Console sink for running without a host process

use crate::core::{split_wire_message, LogLevel, LogSink, ResolvedLocation, Result};
use async_trait::async_trait;
use chrono::Utc;
use colored::Colorize;

/// Prints deliveries to stdout, or stderr for error levels.
///
/// Line format: `[timestamp] [LEVEL] name - message (file:line)`. Never fails,
/// which makes it a fallback target when no backend is attached.
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn format_line(
        &self,
        level: LogLevel,
        text: &str,
        location: Option<&ResolvedLocation>,
    ) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:5}", level.to_str())
        };

        let (name, message) = split_wire_message(text).unwrap_or(("-", text));
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");

        let base = format!("[{}] [{}] {} - {}", timestamp, level_str, name, message);
        match location {
            Some(loc) => format!("{} ({}:{})", base, loc.file, loc.line),
            None => base,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSink for ConsoleSink {
    async fn deliver(
        &self,
        level: LogLevel,
        text: &str,
        location: Option<&ResolvedLocation>,
    ) -> Result<()> {
        let output = self.format_line(level, text, location);
        match level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
