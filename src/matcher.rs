//! Tolerance-based annotation matching
//!
//! The host holds no native references, only data, so update and delete
//! locate their target by scanning the page for the annotation whose
//! geometry matches within tolerance. First match wins; annotations that
//! coincide within tolerance are indistinguishable, a known limitation of
//! matching without stable identifiers.

use crate::error::{ensure_finite_point, ensure_page_height, AnnotError, Result};
use crate::geometry::{Rectangle, MATCH_EPSILON};
use crate::native::{AnnotKind, DocumentLock, NativeAnnotation, NativePage};

/// Delete the markup annotation whose anchor rectangles match `rects`.
///
/// A candidate matches iff it has the same rectangle count and every quad
/// matches the rectangle at the same position (native iteration order, no
/// permutation search) within [`MATCH_EPSILON`] in host coordinates.
///
/// No match reports [`AnnotError::Unknown`], indistinguishable from an
/// engine fault.
pub fn delete_highlight<P: NativePage>(
    doc: &DocumentLock,
    page: &mut P,
    page_height: f64,
    rects: &[Rectangle],
) -> Result<()> {
    ensure_page_height(page_height)?;
    if rects.is_empty() {
        return Err(AnnotError::InvalidArguments(
            "target rectangle list is empty",
        ));
    }

    let _guard = doc.lock();

    tracing::debug!(
        "deleting markup annotation (height: {}) with {} rectangles",
        page_height,
        rects.len()
    );

    match find_markup(page, page_height, rects)? {
        Some(index) => {
            page.delete_annotation(index)?;
            tracing::debug!("deleted matching markup annotation at slot {}", index);
            Ok(())
        }
        None => {
            tracing::debug!("no matching markup annotation found");
            Err(AnnotError::Unknown("no matching annotation found".into()))
        }
    }
}

/// Delete the sticky note anchored within tolerance of `(x, y)` in native
/// coordinates.
pub fn delete_note<P: NativePage>(
    doc: &DocumentLock,
    page: &mut P,
    x: f64,
    y: f64,
) -> Result<()> {
    ensure_finite_point(x, y)?;

    let _guard = doc.lock();

    match find_note(page, x, y)? {
        Some(index) => {
            tracing::debug!("found note near ({:.1}, {:.1}), deleting", x, y);
            page.delete_annotation(index)?;
            Ok(())
        }
        None => {
            tracing::debug!("no note found at ({:.1}, {:.1})", x, y);
            Err(AnnotError::Unknown("no matching note found".into()))
        }
    }
}

/// Replace the contents of the sticky note anchored within tolerance of
/// `(x, y)` and regenerate its appearance.
pub fn update_note_content<P: NativePage>(
    doc: &DocumentLock,
    page: &mut P,
    x: f64,
    y: f64,
    content: &str,
) -> Result<()> {
    ensure_finite_point(x, y)?;

    let _guard = doc.lock();

    match find_note(page, x, y)? {
        Some(index) => {
            tracing::debug!("found note near ({:.1}, {:.1}), updating content", x, y);
            let annot = page.annotation_mut(index)?;
            annot.set_contents(content)?;
            annot.update()?;
            Ok(())
        }
        None => {
            tracing::debug!("no note found at ({:.1}, {:.1})", x, y);
            Err(AnnotError::Unknown("no matching note found".into()))
        }
    }
}

/// Scan markup-kind annotations for one matching `rects` positionally.
fn find_markup<P: NativePage>(
    page: &P,
    page_height: f64,
    rects: &[Rectangle],
) -> Result<Option<usize>> {
    let count = page.annotation_count()?;

    for index in 0..count {
        let annot = page.annotation(index)?;
        if !annot.kind().is_markup() {
            continue;
        }

        let quads = annot.quads()?;
        if quads.len() != rects.len() {
            continue;
        }

        let matches = rects
            .iter()
            .zip(quads.iter())
            .all(|(rect, quad)| rect.matches_quad(quad, page_height, MATCH_EPSILON));
        if matches {
            return Ok(Some(index));
        }
    }

    Ok(None)
}

/// Scan `Text`-kind annotations for one anchored within tolerance of
/// `(x, y)`, compared directly in native space.
fn find_note<P: NativePage>(page: &P, x: f64, y: f64) -> Result<Option<usize>> {
    let count = page.annotation_count()?;

    for index in 0..count {
        let annot = page.annotation(index)?;
        if annot.kind() != AnnotKind::Text {
            continue;
        }

        let rect = annot.bounds()?;
        if (rect.x0 as f64 - x).abs() < MATCH_EPSILON && (rect.y0 as f64 - y).abs() < MATCH_EPSILON
        {
            return Ok(Some(index));
        }
    }

    Ok(None)
}
