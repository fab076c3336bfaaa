//! Annotation reading
//!
//! Walks a page's native annotation list and lifts markup annotations and
//! sticky notes into plain host values. Both operations hold the document
//! lock for their entire duration.
//!
//! The two paths fail differently on purpose: a markup read discards all
//! partial state on any engine fault, while a note read keeps what it
//! collected before the fault. See the contracts on each function.

use mupdf::Rect;

use crate::color::HighlightColor;
use crate::error::{ensure_page_height, AnnotError, Result};
use crate::geometry::{quads_bounds, Rectangle};
use crate::native::{AnnotKind, DocumentLock, NativeAnnotation, NativePage, NativeResult};
use crate::types::{Highlight, MarkupKind, Note};

/// Markup annotation data gathered in the first pass, before text lookup.
struct PendingMarkup {
    kind: MarkupKind,
    rects: Vec<Rectangle>,
    /// Native-space union of the anchor quads, used as the text span.
    span: Rect,
    color: HighlightColor,
    contents: Option<String>,
}

/// Read all markup annotations (highlight, underline, strikeout) on a
/// page.
///
/// Annotations without anchor geometry are skipped. Text is taken from
/// the annotation's stored contents when present, otherwise recovered
/// from the page's text layer using the union of the anchor quads as the
/// selection span; text-layer extraction is triggered at most once per
/// page, on first need.
///
/// Returned values follow native iteration order. Any engine fault
/// discards all partial results and reports [`AnnotError::Unknown`];
/// this path never returns a partial list.
pub fn read_highlights<P: NativePage>(
    doc: &DocumentLock,
    page: &mut P,
    page_height: f64,
    page_index: u32,
) -> Result<Vec<Highlight>> {
    ensure_page_height(page_height)?;

    let _guard = doc.lock();

    tracing::debug!(
        "reading markup annotations on page {} (height: {})",
        page_index,
        page_height
    );

    let count = page.annotation_count()?;
    let mut pending: Vec<PendingMarkup> = Vec::new();
    pending
        .try_reserve(count)
        .map_err(|_| AnnotError::OutOfMemory)?;

    // First pass: collect geometry, color and stored contents.
    for index in 0..count {
        let annot = page.annotation(index)?;
        let kind = match annot.kind().as_markup() {
            Some(kind) => kind,
            None => continue,
        };

        let quads = annot.quads()?;
        if quads.is_empty() {
            continue;
        }

        let rects = quads
            .iter()
            .map(|quad| Rectangle::from_quad(quad, page_height))
            .collect();
        let span = quads_bounds(&quads);
        let color = HighlightColor::classify(&annot.color()?);
        let contents = annot.contents()?.filter(|text| !text.is_empty());

        pending.push(PendingMarkup {
            kind,
            rects,
            span,
            color,
            contents,
        });
    }

    // Second pass: resolve text for annotations that carry none.
    let mut highlights = Vec::new();
    highlights
        .try_reserve(pending.len())
        .map_err(|_| AnnotError::OutOfMemory)?;

    for entry in pending {
        let text = match entry.contents {
            Some(text) => Some(text),
            None => {
                if !page.text_layer_ready() {
                    page.extract_text_layer()?;
                }
                page.copy_selection(entry.span)?
                    .filter(|text| !text.is_empty())
            }
        };

        highlights.push(Highlight::new(
            page_index,
            entry.kind,
            entry.rects,
            entry.color,
            text,
        ));
    }

    tracing::debug!(
        "page {}: {} of {} annotations are markup",
        page_index,
        highlights.len(),
        count
    );

    Ok(highlights)
}

/// Read all sticky notes on a page.
///
/// Note positions stay in native coordinates (origin bottom-left); see
/// [`Note`]. An engine fault mid-scan is logged and ends the scan early:
/// whatever was collected so far is returned as `Ok`, not an error.
pub fn read_notes<P: NativePage>(
    doc: &DocumentLock,
    page: &P,
    page_index: u32,
) -> Result<Vec<Note>> {
    let _guard = doc.lock();

    let mut notes = Vec::new();

    let count = match page.annotation_count() {
        Ok(count) => count,
        Err(err) => {
            tracing::warn!(
                "failed to read annotation list on page {}: {}",
                page_index,
                err
            );
            return Ok(notes);
        }
    };
    notes
        .try_reserve(count)
        .map_err(|_| AnnotError::OutOfMemory)?;

    for index in 0..count {
        match read_note_at(page, page_index, index) {
            Ok(Some(note)) => {
                tracing::debug!(
                    "found sticky note on page {} at ({:.0}, {:.0})",
                    page_index,
                    note.x,
                    note.y
                );
                notes.push(note);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(
                    "engine fault while reading notes on page {}: {}; keeping {} notes",
                    page_index,
                    err,
                    notes.len()
                );
                break;
            }
        }
    }

    tracing::debug!("found {} notes on page {}", notes.len(), page_index);

    Ok(notes)
}

fn read_note_at<P: NativePage>(
    page: &P,
    page_index: u32,
    index: usize,
) -> NativeResult<Option<Note>> {
    let annot = page.annotation(index)?;
    if annot.kind() != AnnotKind::Text {
        return Ok(None);
    }

    let rect = annot.bounds()?;
    let content = annot.contents()?.filter(|text| !text.is_empty());

    Ok(Some(Note::new(
        page_index,
        rect.x0 as f64,
        rect.y0 as f64,
        content,
    )))
}
