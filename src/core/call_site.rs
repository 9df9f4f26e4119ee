//! Call-site types and the stack frame parser
//!
//! Stack text mixes parseable frames with headers, symbol lines and blank
//! lines, so [`parse_line`] returns `None` for anything it cannot read
//! instead of failing. Two frame dialects are understood:
//!
//! - `at handler (http://localhost:1420/src/auth.ts:42:7)` and `at src/main.rs:10:5`
//! - `handler@http://localhost:1420/src/auth.ts:42:7`

use serde::{Deserialize, Serialize};
use url::Url;

/// Leading call marker emitted by V8-style and Rust backtraces.
const CALL_MARKER: &str = "at ";

/// One frame location as read from stack text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawCallSite {
    /// The location exactly as matched, used as the source map cache key.
    pub url: String,
    /// `url` without scheme and host.
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// The location attached to a log event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub file: String,
    pub line: u32,
}

impl ResolvedLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl From<&RawCallSite> for ResolvedLocation {
    fn from(raw: &RawCallSite) -> Self {
        Self {
            file: raw.file.clone(),
            line: raw.line,
        }
    }
}

/// Parse one line of stack text into a call site.
///
/// # Examples
///
/// ```
/// use rust_log_bridge::core::call_site::parse_line;
///
/// let site = parse_line("    at login (http://localhost:1420/src/auth.ts:42:7)").unwrap();
/// assert_eq!(site.url, "http://localhost:1420/src/auth.ts");
/// assert_eq!(site.file, "src/auth.ts");
/// assert_eq!((site.line, site.column), (42, 7));
///
/// assert!(parse_line("Error: boom").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<RawCallSite> {
    let mut candidate = line.trim();
    if let Some(rest) = candidate.strip_prefix(CALL_MARKER) {
        candidate = rest;
    }

    if candidate.ends_with(')') {
        if let Some(open) = candidate.rfind('(') {
            candidate = &candidate[open + 1..candidate.len() - 1];
        }
    }

    if let Some(at) = candidate.rfind('@') {
        candidate = &candidate[at + 1..];
    }

    let last_colon = candidate.rfind(':').filter(|&idx| idx > 0)?;
    let second_last_colon = candidate[..last_colon].rfind(':').filter(|&idx| idx > 0)?;

    let url = &candidate[..second_last_colon];
    let line = parse_position(&candidate[second_last_colon + 1..last_colon])?;
    let column = parse_position(&candidate[last_colon + 1..])?;

    Some(RawCallSite {
        url: url.to_string(),
        file: strip_origin(url),
        line,
        column,
    })
}

fn parse_position(s: &str) -> Option<u32> {
    s.parse::<u32>().ok().filter(|&n| n >= 1)
}

/// Remove scheme, host and the leading `/` from an absolute URL.
///
/// Anything that is not a hierarchical URL (a relative path, or a Windows
/// drive path that only looks like a scheme) is returned unchanged.
///
/// # Examples
///
/// ```
/// use rust_log_bridge::core::call_site::strip_origin;
///
/// assert_eq!(strip_origin("http://localhost:1420/src/App.vue"), "src/App.vue");
/// assert_eq!(strip_origin("src/App.vue"), "src/App.vue");
/// ```
pub fn strip_origin(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if !parsed.cannot_be_a_base() => {
            let path = parsed.path();
            path.strip_prefix('/').unwrap_or(path).to_string()
        }
        _ => url.to_string(),
    }
}
