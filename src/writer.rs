//! Annotation export
//!
//! Converts host highlight and note values back into native annotation
//! objects and commits them to the page. Failures are isolated per
//! annotation: one bad item is logged and skipped, the batch continues.

use mupdf::{Quad, Rect};

use crate::error::{ensure_page_height, Result};
use crate::native::{AnnotKind, DocumentLock, NativeAnnotation, NativePage, NativeResult};
use crate::types::{Highlight, Note};

/// Side length of the anchor rectangle created for a sticky-note icon,
/// in native units.
const NOTE_ANCHOR_SIZE: f64 = 24.0;

/// Export the highlights belonging to `page_index` as native markup
/// annotations, preserving each value's markup kind.
///
/// Returns the number of annotations actually committed. A highlight
/// without rectangles is skipped and a failed item does not abort the
/// batch, so the count may be smaller than the input; callers must not
/// assume otherwise.
pub fn export_highlights<P: NativePage>(
    doc: &DocumentLock,
    page: &mut P,
    page_height: f64,
    page_index: u32,
    highlights: &[Highlight],
) -> Result<usize> {
    ensure_page_height(page_height)?;

    let _guard = doc.lock();

    tracing::debug!(
        "exporting {} highlights to page {} (height: {})",
        highlights.len(),
        page_index,
        page_height
    );

    let mut committed = 0;
    for highlight in highlights {
        if highlight.page_index != page_index {
            continue;
        }
        if highlight.rects.is_empty() {
            tracing::debug!("highlight {} has no rectangles, skipping", highlight.id);
            continue;
        }

        match write_markup(page, page_height, highlight) {
            Ok(()) => {
                committed += 1;
                tracing::debug!(
                    "exported highlight {} with {} rectangles",
                    highlight.id,
                    highlight.rects.len()
                );
            }
            Err(err) => {
                tracing::warn!("failed to export highlight {}: {}", highlight.id, err);
            }
        }
    }

    tracing::debug!("exported {} highlights to page {}", committed, page_index);

    Ok(committed)
}

/// Export the notes belonging to `page_index` as native sticky notes.
///
/// Each note becomes a `Text`-kind annotation with a fixed-size anchor
/// rectangle at the note's stored native coordinates. Same per-item
/// isolation and count semantics as [`export_highlights`].
pub fn export_notes<P: NativePage>(
    doc: &DocumentLock,
    page: &mut P,
    page_index: u32,
    notes: &[Note],
) -> Result<usize> {
    let _guard = doc.lock();

    let mut committed = 0;
    for note in notes {
        if note.page != page_index {
            continue;
        }

        match write_note(page, note) {
            Ok(()) => {
                committed += 1;
                tracing::debug!(
                    "exported note {} at ({:.1}, {:.1})",
                    note.id,
                    note.x,
                    note.y
                );
            }
            Err(err) => {
                tracing::warn!("failed to export note {}: {}", note.id, err);
            }
        }
    }

    tracing::debug!("exported {} notes to page {}", committed, page_index);

    Ok(committed)
}

fn write_markup<P: NativePage>(
    page: &mut P,
    page_height: f64,
    highlight: &Highlight,
) -> NativeResult<()> {
    let quads: Vec<Quad> = highlight
        .rects
        .iter()
        .map(|rect| rect.to_quad(page_height))
        .collect();

    let annot = page.create_annotation(highlight.kind.into())?;
    annot.set_quads(&quads)?;
    annot.set_color(highlight.color.to_rgb())?;
    if let Some(text) = highlight.text.as_deref().filter(|text| !text.is_empty()) {
        annot.set_contents(text)?;
    }
    annot.update()
}

fn write_note<P: NativePage>(page: &mut P, note: &Note) -> NativeResult<()> {
    let x = note.x as f32;
    let y = note.y as f32;
    let size = NOTE_ANCHOR_SIZE as f32;

    let annot = page.create_annotation(AnnotKind::Text)?;
    annot.set_bounds(Rect {
        x0: x,
        y0: y,
        x1: x + size,
        y1: y + size,
    })?;
    if let Some(content) = note.content.as_deref().filter(|content| !content.is_empty()) {
        annot.set_contents(content)?;
    }
    annot.update()
}
