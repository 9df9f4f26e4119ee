//! Per-URL memoization of parsed source maps

use super::map::SourceMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cached outcome of loading one URL.
#[derive(Debug, Clone)]
pub enum CachedMap {
    Present(Arc<SourceMap>),
    /// No inline map, or fetching/parsing failed.
    Absent,
}

impl CachedMap {
    pub fn map(&self) -> Option<&Arc<SourceMap>> {
        match self {
            CachedMap::Present(map) => Some(map),
            CachedMap::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, CachedMap::Present(_))
    }
}

impl From<Option<SourceMap>> for CachedMap {
    fn from(map: Option<SourceMap>) -> Self {
        match map {
            Some(map) => CachedMap::Present(Arc::new(map)),
            None => CachedMap::Absent,
        }
    }
}

/// Append-only cache keyed by generated file URL.
///
/// The first entry stored for a URL is kept for the life of the cache;
/// later inserts for the same URL return the existing entry.
#[derive(Debug, Default)]
pub struct SourceMapCache {
    entries: RwLock<HashMap<String, CachedMap>>,
}

impl SourceMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<CachedMap> {
        self.entries.read().get(url).cloned()
    }

    /// Store `entry` unless `url` is already cached; returns the stored entry.
    pub fn insert(&self, url: &str, entry: CachedMap) -> CachedMap {
        self.entries
            .write()
            .entry(url.to_string())
            .or_insert(entry)
            .clone()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
