//! Classification of stack frames that belong to the logging subsystem

use serde::{Deserialize, Serialize};

/// Path markers of the logging subsystem's own source.
///
/// Matching is anchored on a directory segment (`/log/`) or a file name
/// prefix (`/log.`), so `dialog.ts` and `login.ts` are not internal.
pub const INTERNAL_MARKERS: &[&str] = &["/log/", "\\log\\", "/log.", "\\log.", "plugin-log"];

/// Returns true if `path` points into the logging subsystem.
///
/// # Examples
///
/// ```
/// use rust_log_bridge::core::frame_filter::is_internal_frame;
///
/// assert!(is_internal_frame("src/lib/log/index.ts"));
/// assert!(!is_internal_frame("src/components/dialog.ts"));
/// ```
pub fn is_internal_frame(path: &str) -> bool {
    INTERNAL_MARKERS.iter().any(|marker| path.contains(marker))
}

/// The fixed internal markers plus any configured extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameFilter {
    extra_markers: Vec<String>,
}

impl FrameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also treat paths containing any of `markers` as internal.
    #[must_use]
    pub fn with_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_markers.extend(
            markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty()),
        );
        self
    }

    pub fn extra_markers(&self) -> &[String] {
        &self.extra_markers
    }

    pub fn is_internal(&self, path: &str) -> bool {
        is_internal_frame(path) || self.extra_markers.iter().any(|m| path.contains(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_paths() {
        assert!(is_internal_frame("src/log/index.ts"));
        assert!(is_internal_frame("http://localhost:1420/src/lib/log/logger.ts"));
        assert!(is_internal_frame(r"C:\app\src\log\logger.ts"));
        assert!(is_internal_frame("src/utils/log.ts"));
        assert!(is_internal_frame(r"src\utils\log.ts"));
        assert!(is_internal_frame(
            "node_modules/@tauri-apps/plugin-log/dist-js/index.js"
        ));
    }

    #[test]
    fn test_caller_paths() {
        assert!(!is_internal_frame("src/App.vue"));
        assert!(!is_internal_frame("src/main.ts"));
        assert!(!is_internal_frame("src/components/dialog.ts"));
        assert!(!is_internal_frame("src/views/login.ts"));
        assert!(!is_internal_frame("src/catalog.ts"));
        assert!(!is_internal_frame("src/logger-view/Panel.vue"));
    }

    #[test]
    fn test_extra_markers() {
        let filter = FrameFilter::new().with_markers(["/vendor/", ""]);
        assert_eq!(filter.extra_markers(), ["/vendor/".to_string()]);
        assert!(filter.is_internal("src/vendor/tracker.js"));
        assert!(filter.is_internal("src/log/index.ts"));
        assert!(!filter.is_internal("src/main.ts"));
    }

    #[test]
    fn test_default_filter_matches_fixed_set() {
        let filter = FrameFilter::default();
        assert!(filter.is_internal("src/log.ts"));
        assert!(!filter.is_internal("src/login.ts"));
    }
}
