//! Source Map v3 documents and inline map extraction

use super::vlq::{decode_mappings, DecodedMappings};
use crate::core::error::{LoggerError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

fn inline_map_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"//[#@]\s*sourceMappingURL=data:application/json[^,\s]*;base64,([A-Za-z0-9+/]+=*)",
        )
        .expect("inline source map pattern is valid")
    })
}

/// Decoded JSON payload of the last inline `sourceMappingURL` comment, if any.
pub fn extract_inline_map(content: &str) -> Result<Option<Vec<u8>>> {
    let Some(payload) = inline_map_pattern()
        .captures_iter(content)
        .last()
        .and_then(|caps| caps.get(1))
    else {
        return Ok(None);
    };

    Ok(Some(STANDARD.decode(payload.as_str())?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceMap {
    version: u32,
    #[serde(default)]
    source_root: Option<String>,
    #[serde(default)]
    sources: Vec<Option<String>>,
    #[serde(default)]
    mappings: String,
}

/// Result of a position lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPosition {
    /// Original source path with `sourceRoot` applied; `None` when the
    /// mapping names no source.
    pub source: Option<String>,
    /// 1-based line in the original source.
    pub line: u32,
    /// 0-based column in the original source.
    pub column: u32,
}

/// A parsed source map ready for lookups.
#[derive(Debug, Clone)]
pub struct SourceMap {
    source_root: Option<String>,
    sources: Vec<Option<String>>,
    mappings: DecodedMappings,
}

impl SourceMap {
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let raw: RawSourceMap = serde_json::from_slice(data)?;
        if raw.version != 3 {
            return Err(LoggerError::InvalidSourceMapVersion(raw.version));
        }

        let mappings = decode_mappings(&raw.mappings)?;
        if let Some(bad) = mappings
            .iter()
            .find(|m| m.source_index as usize >= raw.sources.len())
        {
            return Err(LoggerError::InvalidSourceIndex(bad.source_index));
        }

        Ok(Self {
            source_root: raw.source_root.filter(|root| !root.is_empty()),
            sources: raw.sources,
            mappings,
        })
    }

    /// Parse the inline map embedded in generated code, if it has one.
    pub fn from_generated(content: &str) -> Result<Option<Self>> {
        match extract_inline_map(content)? {
            Some(json) => Ok(Some(Self::from_slice(&json)?)),
            None => Ok(None),
        }
    }

    /// Look up a generated position; `line` is 1-based, `column` 0-based.
    pub fn lookup(&self, line: u32, column: u32) -> Option<OriginalPosition> {
        let mapping = self.mappings.find(line.checked_sub(1)?, column)?;
        let source = self
            .sources
            .get(mapping.source_index as usize)
            .and_then(|s| s.as_deref())
            .map(|s| self.with_root(s));

        Some(OriginalPosition {
            source,
            line: mapping.original_line + 1,
            column: mapping.original_column,
        })
    }

    fn with_root(&self, source: &str) -> String {
        match &self.source_root {
            Some(root) => format!("{}/{}", root.trim_end_matches('/'), source),
            None => source.to_string(),
        }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn mapping_count(&self) -> usize {
        self.mappings.len()
    }
}
