//! Stack capture and caller location

use super::call_site::{parse_line, RawCallSite};
use super::frame_filter::FrameFilter;
use std::fmt::Write as _;
use std::sync::Arc;

/// Symbol prefix shared by every function in this crate.
const CRATE_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// A textual snapshot of the current call chain, innermost frame first.
pub trait StackCapture: Send + Sync {
    fn capture(&self) -> String;
}

/// Frames rendered by [`BacktraceCapture::new`].
pub const DEFAULT_CALLER_FRAMES: usize = 8;

/// Native stack capture.
///
/// Frames belonging to the backtrace machinery and to this crate are elided,
/// so the first rendered frame is the code that called into the logger.
/// Each frame is rendered as `at <symbol> (<file>:<line>:<column>)`; frames
/// without debug info are dropped. The walk stops once `max_frames` frames
/// have been rendered, so symbols beyond the caller are never resolved.
#[derive(Debug, Clone, Copy)]
pub struct BacktraceCapture {
    max_frames: usize,
}

impl BacktraceCapture {
    pub fn new() -> Self {
        Self::with_max_frames(DEFAULT_CALLER_FRAMES)
    }

    pub fn with_max_frames(max_frames: usize) -> Self {
        Self {
            max_frames: max_frames.max(1),
        }
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }
}

impl Default for BacktraceCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl StackCapture for BacktraceCapture {
    fn capture(&self) -> String {
        let mut out = String::new();
        let mut entered_crate = false;
        let mut rendered = 0;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if rendered >= self.max_frames {
                    return;
                }
                let name = symbol.name().map(|n| n.to_string()).unwrap_or_default();
                if name.contains(CRATE_PREFIX) {
                    entered_crate = true;
                    return;
                }
                if !entered_crate {
                    return;
                }
                let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                    return;
                };
                let column = symbol.colno().unwrap_or(1).max(1);
                let _ = writeln!(out, "    at {} ({}:{}:{})", name, file.display(), line, column);
                rendered += 1;
            });
            rendered < self.max_frames
        });

        out
    }
}

/// Returns preset stack text.
///
/// For hosts that receive stack text from another runtime, and for tests.
#[derive(Debug, Clone, Default)]
pub struct FixedCapture {
    text: String,
}

impl FixedCapture {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl StackCapture for FixedCapture {
    fn capture(&self) -> String {
        self.text.clone()
    }
}

/// Walks captured stack text and returns the first caller frame.
#[derive(Clone)]
pub struct CallerLocator {
    capture: Arc<dyn StackCapture>,
    filter: FrameFilter,
}

impl CallerLocator {
    pub fn new(capture: Arc<dyn StackCapture>, filter: FrameFilter) -> Self {
        Self { capture, filter }
    }

    pub fn filter(&self) -> &FrameFilter {
        &self.filter
    }

    /// Capture the current stack and locate the caller.
    pub fn locate(&self) -> Option<RawCallSite> {
        self.locate_in(&self.capture.capture())
    }

    /// Locate the first frame in `stack` that parses and is not internal.
    pub fn locate_in(&self, stack: &str) -> Option<RawCallSite> {
        stack
            .lines()
            .filter_map(parse_line)
            .find(|site| !self.filter.is_internal(&site.file))
    }
}

impl Default for CallerLocator {
    fn default() -> Self {
        Self::new(Arc::new(BacktraceCapture::new()), FrameFilter::default())
    }
}

impl std::fmt::Debug for CallerLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallerLocator")
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V8_STACK: &str = "Error\n\
        \x20   at getCallSite (http://localhost:1420/src/lib/log/index.ts:20:15)\n\
        \x20   at Object.info (http://localhost:1420/src/lib/log/index.ts:61:18)\n\
        \x20   at login (http://localhost:1420/src/auth.ts:42:7)\n\
        \x20   at http://localhost:1420/src/main.ts:9:1";

    const FIREFOX_STACK: &str = "getCallSite@http://localhost:1420/src/log.ts:20:15\n\
        info@http://localhost:1420/src/log.ts:61:18\n\
        mounted@http://localhost:1420/src/App.vue:33:9\n";

    fn locator(text: &str) -> CallerLocator {
        CallerLocator::new(Arc::new(FixedCapture::new(text)), FrameFilter::default())
    }

    #[test]
    fn test_locate_skips_header_and_internal_frames() {
        let site = locator(V8_STACK).locate().unwrap();
        assert_eq!(site.url, "http://localhost:1420/src/auth.ts");
        assert_eq!(site.file, "src/auth.ts");
        assert_eq!((site.line, site.column), (42, 7));
    }

    #[test]
    fn test_locate_at_sign_dialect() {
        let site = locator(FIREFOX_STACK).locate().unwrap();
        assert_eq!(site.file, "src/App.vue");
        assert_eq!(site.line, 33);
    }

    #[test]
    fn test_locate_none_when_only_internal_frames() {
        let stack = "Error\n    at a (src/log/index.ts:1:1)\n    at b (src/log.ts:2:2)";
        assert!(locator(stack).locate().is_none());
        assert!(locator("").locate().is_none());
    }

    #[test]
    fn test_locate_with_extra_markers() {
        let filter = FrameFilter::new().with_markers(["src/auth.ts"]);
        let locator = CallerLocator::new(Arc::new(FixedCapture::new(V8_STACK)), filter);
        let site = locator.locate().unwrap();
        assert_eq!(site.file, "src/main.ts");
    }

    #[test]
    fn test_backtrace_capture_elides_crate_frames() {
        // Called from inside the crate, so every frame up to the test harness
        // is elided and nothing from this module may appear.
        let text = BacktraceCapture::new().capture();
        assert!(!text.contains(CRATE_PREFIX));
        for line in text.lines() {
            assert!(line.starts_with("    at "));
        }
    }

    #[inline(never)]
    fn nested(depth: usize, capture: &BacktraceCapture) -> String {
        if depth == 0 {
            capture.capture()
        } else {
            let text = nested(depth - 1, capture);
            std::hint::black_box(text)
        }
    }

    #[test]
    fn test_backtrace_capture_stops_at_max_frames() {
        let capture = BacktraceCapture::with_max_frames(1);
        assert_eq!(capture.max_frames(), 1);
        assert!(capture.capture().lines().count() <= 1);

        // recursion inside the crate is elided and does not eat the budget
        let text = nested(20, &BacktraceCapture::with_max_frames(2));
        assert!(text.lines().count() <= 2);
        assert!(!text.contains(CRATE_PREFIX));

        assert_eq!(BacktraceCapture::with_max_frames(0).max_frames(), 1);
        assert_eq!(BacktraceCapture::default().max_frames(), DEFAULT_CALLER_FRAMES);
    }
}
