//! Serialization of crease patterns for downstream renderers.
//!
//! Coordinates are rounded to 3 decimal places so exported files are
//! stable across runs and platforms.

use serde::Serialize;

use crate::math::Point2;
use crate::operations::{Crease, CreaseKind};

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// A point with export-rounded coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point2> for ExportPoint {
    fn from(p: Point2) -> Self {
        Self {
            x: round3(p.x),
            y: round3(p.y),
        }
    }
}

/// One exported crease: kind tag (`"M"` or `"V"`) plus endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreaseRecord {
    pub kind: &'static str,
    pub a: ExportPoint,
    pub b: ExportPoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Converts creases to export records, preserving order.
#[must_use]
pub fn crease_records(creases: &[Crease]) -> Vec<CreaseRecord> {
    creases
        .iter()
        .map(|c| CreaseRecord {
            kind: match c.kind {
                CreaseKind::Mountain => "M",
                CreaseKind::Valley => "V",
            },
            a: c.a.into(),
            b: c.b.into(),
            source: c.source.clone(),
        })
        .collect()
}

/// Serializes creases to a JSON array.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] when serialization fails.
pub fn creases_to_json(creases: &[Crease]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&crease_records(creases))
}
