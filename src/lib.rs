//! Marginalia
//!
//! Markup and sticky-note annotation layer for MuPDF-backed documents.
//!
//! The host application models annotations as plain values with
//! rectangles in top-left-origin page coordinates, while the document
//! engine stores native annotation objects in bottom-left-origin
//! coordinates. This crate reconciles the two: it reads native markup
//! annotations and sticky notes into values, locates existing
//! annotations by tolerance-based geometric matching (the engine exposes
//! no stable identifiers), and exports values back as native objects.
//!
//! Page and document lifecycle, text-layer construction, and persistence
//! belong to the embedding layer; the crate receives an already-loaded
//! page behind the [`native::NativePage`] seam plus the document's
//! [`native::DocumentLock`], and hands plain data structures back.
//!
//! # Modules
//!
//! - `geometry`: host rectangle type and the per-call coordinate transform
//! - `color`: palette classification of raw color samples
//! - `types`: the `Highlight` and `Note` values exchanged with the host
//! - `native`: trait seam over the engine's page/annotation objects
//! - `reader`: native annotations → values
//! - `matcher`: value-based delete/update against existing annotations
//! - `writer`: values → native annotations

pub mod color;
pub mod error;
pub mod geometry;
pub mod matcher;
pub mod native;
pub mod reader;
pub mod types;
pub mod writer;

pub use color::{ColorSample, HighlightColor};
pub use error::{AnnotError, Result};
pub use geometry::{Rectangle, MATCH_EPSILON};
pub use matcher::{delete_highlight, delete_note, update_note_content};
pub use native::{
    AnnotKind, DocumentLock, NativeAnnotation, NativeError, NativePage, NativeResult,
};
pub use reader::{read_highlights, read_notes};
pub use types::{Highlight, MarkupKind, Note};
pub use writer::{export_highlights, export_notes};
