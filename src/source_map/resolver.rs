//! Translation of captured locations back to original sources

use super::cache::{CachedMap, SourceMapCache};
use super::fetch::{DefaultFetcher, SourceFetcher};
use super::map::SourceMap;
use crate::core::call_site::{strip_origin, RawCallSite, ResolvedLocation};
use crate::core::error::Result;
use std::sync::Arc;

/// How a location was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Translated through a source map.
    Mapped(ResolvedLocation),
    /// The captured location, unchanged.
    Raw(ResolvedLocation),
}

impl Resolution {
    pub fn location(&self) -> &ResolvedLocation {
        match self {
            Resolution::Mapped(location) | Resolution::Raw(location) => location,
        }
    }

    pub fn into_location(self) -> ResolvedLocation {
        match self {
            Resolution::Mapped(location) | Resolution::Raw(location) => location,
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Resolution::Mapped(_))
    }
}

/// Resolves call sites through inline source maps.
///
/// Maps are loaded once per URL and kept in the shared [`SourceMapCache`];
/// a URL whose content could not be fetched or carries no usable map is
/// cached as absent and never fetched again.
#[derive(Clone)]
pub struct SourceMapResolver {
    cache: Arc<SourceMapCache>,
    fetcher: Arc<dyn SourceFetcher>,
}

impl SourceMapResolver {
    pub fn new(cache: Arc<SourceMapCache>, fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self { cache, fetcher }
    }

    pub fn cache(&self) -> &Arc<SourceMapCache> {
        &self.cache
    }

    /// Resolve `raw` to the best available location. Never fails.
    pub async fn resolve(&self, raw: &RawCallSite) -> ResolvedLocation {
        self.resolve_detailed(raw).await.into_location()
    }

    /// Like [`resolve`](Self::resolve), reporting whether a map was used.
    pub async fn resolve_detailed(&self, raw: &RawCallSite) -> Resolution {
        let entry = self.map_for(&raw.url).await;

        let mapped = entry.map().and_then(|map| {
            let position = map.lookup(raw.line, raw.column.saturating_sub(1))?;
            let file = position
                .source
                .as_deref()
                .map(strip_origin)
                .unwrap_or_else(|| raw.file.clone());
            Some(ResolvedLocation::new(file, position.line))
        });

        match mapped {
            Some(location) => Resolution::Mapped(location),
            None => Resolution::Raw(ResolvedLocation::from(raw)),
        }
    }

    async fn map_for(&self, url: &str) -> CachedMap {
        if let Some(entry) = self.cache.get(url) {
            return entry;
        }

        let loaded = self.load(url).await.unwrap_or(None);
        self.cache.insert(url, loaded.into())
    }

    async fn load(&self, url: &str) -> Result<Option<SourceMap>> {
        let content = self.fetcher.fetch(url).await?;
        SourceMap::from_generated(&content)
    }
}

impl Default for SourceMapResolver {
    fn default() -> Self {
        Self::new(Arc::new(SourceMapCache::new()), Arc::new(DefaultFetcher::new()))
    }
}

impl std::fmt::Debug for SourceMapResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceMapResolver")
            .field("cached_urls", &self.cache.len())
            .finish_non_exhaustive()
    }
}
