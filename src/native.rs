//! Native annotation boundary
//!
//! The engine's Rust binding does not expose annotation enumeration, so
//! the core is written against a small trait seam that the page-lifecycle
//! layer implements over the engine. Geometry crossing the seam uses the
//! engine's own [`Quad`] and [`Rect`] types.
//!
//! # Thread Safety
//!
//! The engine context shared by a document's pages is not thread-safe and
//! no call into it is reentrant. Every public operation in this crate
//! serializes on the owning [`DocumentLock`] for its entire duration.

use mupdf::{Quad, Rect};
use parking_lot::{Mutex, MutexGuard};
use thiserror::Error;

use crate::color::ColorSample;
use crate::types::MarkupKind;

/// Fault raised by the underlying document engine.
///
/// The engine reports failures as untyped exceptions; public operations
/// translate this into [`AnnotError::Unknown`](crate::error::AnnotError)
/// at their boundary.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct NativeError(String);

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Result type alias for native-boundary calls.
pub type NativeResult<T> = std::result::Result<T, NativeError>;

/// Native annotation type tags this core filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotKind {
    Highlight,
    Underline,
    StrikeOut,
    /// Point-anchored sticky note.
    Text,
    /// Any kind this core does not handle (ink, stamp, link, ...).
    Other,
}

impl AnnotKind {
    /// Whether this kind anchors to text quadrilaterals.
    pub fn is_markup(self) -> bool {
        matches!(self, Self::Highlight | Self::Underline | Self::StrikeOut)
    }

    /// Markup counterpart of this kind, if any.
    pub fn as_markup(self) -> Option<MarkupKind> {
        match self {
            Self::Highlight => Some(MarkupKind::Highlight),
            Self::Underline => Some(MarkupKind::Underline),
            Self::StrikeOut => Some(MarkupKind::StrikeOut),
            _ => None,
        }
    }
}

impl From<MarkupKind> for AnnotKind {
    fn from(kind: MarkupKind) -> Self {
        match kind {
            MarkupKind::Highlight => Self::Highlight,
            MarkupKind::Underline => Self::Underline,
            MarkupKind::StrikeOut => Self::StrikeOut,
        }
    }
}

/// One native annotation object attached to a page.
pub trait NativeAnnotation {
    fn kind(&self) -> AnnotKind;

    /// Anchor quadrilaterals of a markup annotation, in native order.
    /// Point kinds report an empty list.
    fn quads(&self) -> NativeResult<Vec<Quad>>;

    /// Bounding rectangle in native space (the anchor rectangle for point
    /// kinds).
    fn bounds(&self) -> NativeResult<Rect>;

    /// Raw color sample as stored on the annotation.
    fn color(&self) -> NativeResult<ColorSample>;

    /// Textual contents stored on the annotation, if any.
    fn contents(&self) -> NativeResult<Option<String>>;

    fn set_quads(&mut self, quads: &[Quad]) -> NativeResult<()>;

    fn set_bounds(&mut self, rect: Rect) -> NativeResult<()>;

    fn set_color(&mut self, rgb: [f32; 3]) -> NativeResult<()>;

    fn set_contents(&mut self, contents: &str) -> NativeResult<()>;

    /// Regenerate the appearance stream after mutation.
    fn update(&mut self) -> NativeResult<()>;
}

/// An already-loaded native page with its annotation list and memoized
/// text layer.
///
/// Annotation indices follow native z/creation order; this core never
/// sorts. Indices are invalidated by [`NativePage::delete_annotation`] and
/// [`NativePage::create_annotation`].
pub trait NativePage {
    type Annot: NativeAnnotation;

    /// Number of annotations attached to the page.
    fn annotation_count(&self) -> NativeResult<usize>;

    /// Annotation at `index`.
    fn annotation(&self, index: usize) -> NativeResult<&Self::Annot>;

    fn annotation_mut(&mut self, index: usize) -> NativeResult<&mut Self::Annot>;

    /// Create a fresh annotation of `kind` appended to the page.
    fn create_annotation(&mut self, kind: AnnotKind) -> NativeResult<&mut Self::Annot>;

    fn delete_annotation(&mut self, index: usize) -> NativeResult<()>;

    /// Whether the page's text layer has already been extracted.
    fn text_layer_ready(&self) -> bool;

    /// Extract the text layer. Memoized on the page; this core calls it
    /// at most once per page, on first need.
    fn extract_text_layer(&mut self) -> NativeResult<()>;

    /// Copy the text overlapping `span` (native space) from the text
    /// layer. Requires a prior [`NativePage::extract_text_layer`].
    fn copy_selection(&self, span: Rect) -> NativeResult<Option<String>>;
}

/// Document-wide critical section guarding all native annotation access.
///
/// One lock exists per document, not per page: pages share the engine
/// context. Operations acquire it via an RAII guard, so it is released on
/// every exit path. There is no cancellation or timeout; a native call
/// that blocks holds the lock until it returns.
#[derive(Debug, Default)]
pub struct DocumentLock {
    mutex: Mutex<()>,
}

impl DocumentLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the document-wide critical section is held.
    pub fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutex.lock()
    }
}
