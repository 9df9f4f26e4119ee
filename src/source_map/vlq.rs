//! Base64 VLQ decoding of source map `mappings`

use crate::core::error::{LoggerError, Result};

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const CONTINUATION_BIT: i64 = 0b10_0000;
const VALUE_MASK: i64 = 0b01_1111;

fn decode_char(ch: u8) -> Result<i64> {
    BASE64_CHARS
        .iter()
        .position(|&c| c == ch)
        .map(|pos| pos as i64)
        .ok_or(LoggerError::InvalidVlqChar(ch as char))
}

/// Decode one comma-separated segment into its signed fields.
pub fn decode_segment(segment: &str) -> Result<Vec<i64>> {
    let mut values = Vec::with_capacity(5);
    let mut value = 0i64;
    let mut shift = 0u32;

    for ch in segment.bytes() {
        let digit = decode_char(ch)?;
        if shift > 55 {
            return Err(LoggerError::VlqOverflow(segment.to_string()));
        }
        value += (digit & VALUE_MASK) << shift;
        shift += 5;

        if digit & CONTINUATION_BIT == 0 {
            // lowest bit carries the sign
            let negative = value & 1 != 0;
            value >>= 1;
            values.push(if negative { -value } else { value });
            value = 0;
            shift = 0;
        }
    }

    if shift != 0 {
        return Err(LoggerError::TruncatedVlq(segment.to_string()));
    }

    Ok(values)
}

/// One generated → original position pair. All fields are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_column: u32,
    pub source_index: u32,
    pub original_line: u32,
    pub original_column: u32,
}

/// Mappings ordered by generated line, then generated column.
#[derive(Debug, Clone, Default)]
pub struct DecodedMappings {
    mappings: Vec<Mapping>,
}

impl DecodedMappings {
    /// Closest mapping at or before `column` on `line`.
    pub fn find(&self, line: u32, column: u32) -> Option<&Mapping> {
        let start = self.mappings.partition_point(|m| m.generated_line < line);
        let end = self.mappings.partition_point(|m| m.generated_line <= line);
        let on_line = &self.mappings[start..end];

        match on_line.partition_point(|m| m.generated_column <= column) {
            0 => None,
            idx => Some(&on_line[idx - 1]),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Decode a full `mappings` string.
///
/// Lines are separated by `;`, segments by `,`. Fields are deltas: the
/// generated column resets every line, the others carry across lines.
/// Single-field segments carry no source and are skipped.
pub fn decode_mappings(mappings: &str) -> Result<DecodedMappings> {
    let mut decoded = Vec::new();
    let mut source = 0i64;
    let mut original_line = 0i64;
    let mut original_column = 0i64;

    for (generated_line, line) in mappings.split(';').enumerate() {
        let mut generated_column = 0i64;
        let mut line_mappings = Vec::new();

        for segment in line.split(',').filter(|s| !s.is_empty()) {
            let fields = decode_segment(segment)?;
            let Some(&column_delta) = fields.first() else {
                continue;
            };
            generated_column += column_delta;

            if fields.len() >= 4 {
                source += fields[1];
                original_line += fields[2];
                original_column += fields[3];

                line_mappings.push(Mapping {
                    generated_line: generated_line as u32,
                    generated_column: clamp(generated_column),
                    source_index: clamp(source),
                    original_line: clamp(original_line),
                    original_column: clamp(original_column),
                });
            }
        }

        // bundlers emit segments in column order but nothing enforces it
        line_mappings.sort_by_key(|m| m.generated_column);
        decoded.extend(line_mappings);
    }

    Ok(DecodedMappings { mappings: decoded })
}

fn clamp(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
