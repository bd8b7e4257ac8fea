//! Normalization of the bin `capacity` field.
//!
//! The `warehouse_layout` collection holds capacity in two encodings: newer
//! records store a structured `{length, width, height}` document, older ones
//! store the same record serialized as dictionary text (single-quoted keys
//! included). This module is the single adapter that papers over the
//! inconsistency; nothing past this boundary sees the raw value.

use bson::Bson;
use serde::{Deserialize, Serialize};

/// A bin's volumetric capacity, normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BinCapacity {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl BinCapacity {
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

/// Parse a raw capacity value of unknown encoding.
///
/// Structured documents pass through as-is; strings are parsed as dictionary
/// text. Parsing never fails outward: anything unreadable collapses to a
/// zero capacity, which contributes nothing to utilization totals.
pub fn parse(raw: Option<&Bson>) -> BinCapacity {
    match raw {
        Some(Bson::Document(doc)) => {
            bson::from_document(doc.clone()).unwrap_or_default()
        }
        Some(Bson::String(text)) => parse_text(text),
        _ => BinCapacity::default(),
    }
}

// Dictionary text is either JSON or the single-quoted variant; try JSON
// first, then retry with quotes rewritten.
fn parse_text(text: &str) -> BinCapacity {
    serde_json::from_str(text)
        .or_else(|_| serde_json::from_str(&text.replace('\'', "\"")))
        .unwrap_or_default()
}
