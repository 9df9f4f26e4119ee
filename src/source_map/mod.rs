//! Source map discovery, parsing and location resolution
//!
//! Development servers embed maps in generated files as a base64
//! `sourceMappingURL` data comment. [`SourceMapResolver`] fetches a generated
//! file once, decodes its inline map and translates bundled positions back to
//! the original source. Production bundles usually ship without maps; those
//! locations are reported as captured.

pub mod cache;
pub mod fetch;
pub mod map;
pub mod resolver;
pub mod vlq;

pub use cache::{CachedMap, SourceMapCache};
pub use fetch::{DefaultFetcher, SourceFetcher};
pub use map::{extract_inline_map, OriginalPosition, SourceMap};
pub use resolver::{Resolution, SourceMapResolver};
