//! Annotation data model
//!
//! Plain values exchanged with the host application. Values are
//! constructed by the reader (or by the host for export), consumed by the
//! writer, and never mutated in place: a change means constructing a new
//! value.

use serde::{Deserialize, Serialize};

use crate::color::HighlightColor;
use crate::geometry::{bounding_box, Rectangle};

/// Markup annotation kinds that anchor to text quadrilaterals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    #[default]
    Highlight,
    Underline,
    StrikeOut,
}

/// One markup annotation, possibly spanning multiple quadrilaterals (a
/// highlight crossing a line break yields one rectangle per line).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    /// Zero-based page index.
    pub page_index: u32,
    /// Native markup kind this was read with; preserved on export.
    #[serde(default)]
    pub kind: MarkupKind,
    /// Anchor rectangles in host coordinates, in native iteration order.
    pub rects: Vec<Rectangle>,
    pub color: HighlightColor,
    /// Annotation text: authoring-tool contents when the annotation
    /// carries any, otherwise text recovered from the page's text layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Synthetic identifier derived from the page and the rounded
    /// bounding-box origin. Not stable across edits and not unique for
    /// coincident annotations; callers needing true identity must assign
    /// their own.
    pub id: String,
}

impl Highlight {
    /// Build a highlight, deriving its synthetic identifier from the
    /// bounding-box origin of `rects`.
    pub fn new(
        page_index: u32,
        kind: MarkupKind,
        rects: Vec<Rectangle>,
        color: HighlightColor,
        text: Option<String>,
    ) -> Self {
        let id = match bounding_box(&rects) {
            Some(bbox) => synthetic_id(page_index, bbox.x1, bbox.y1),
            None => format!("embedded-{}", page_index),
        };
        Self {
            page_index,
            kind,
            rects,
            color,
            text,
            id,
        }
    }

    /// Host-space bounding box over all anchor rectangles.
    pub fn bounding_box(&self) -> Option<Rectangle> {
        bounding_box(&self.rects)
    }
}

/// A point-anchored sticky note.
///
/// `(x, y)` is stored untransformed in the document's native coordinate
/// space (origin bottom-left, Y up), matching the anchor of the embedded
/// annotation; callers convert for display if needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Zero-based page index.
    pub page: u32,
    pub x: f64,
    pub y: f64,
    /// Synthetic identifier (page + rounded coordinates); same caveats as
    /// [`Highlight::id`].
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Note {
    pub fn new(page: u32, x: f64, y: f64, content: Option<String>) -> Self {
        Self {
            page,
            x,
            y,
            id: synthetic_id(page, x, y),
            content,
        }
    }
}

/// `embedded-{page}-{x}-{y}` with coordinates rounded to whole units.
fn synthetic_id(page: u32, x: f64, y: f64) -> String {
    format!("embedded-{}-{:.0}-{:.0}", page, x, y)
}
