//! In-memory implementation of the native page boundary.
//!
//! Stands in for the engine-backed page object so the read, match, and
//! export paths can be exercised end to end, including injected engine
//! faults.

use mupdf::{Point, Quad, Rect};

use marginalia::{
    AnnotKind, ColorSample, NativeAnnotation, NativeError, NativePage, NativeResult,
};

/// Fault injection switches for [`MemPage`].
#[derive(Debug, Default)]
pub struct Faults {
    /// `annotation(index)` fails once iteration reaches this slot.
    pub annotation_at: Option<usize>,
    /// `create_annotation` fails for the n-th creation attempt (0-based).
    pub create_at: Option<usize>,
    /// `extract_text_layer` fails.
    pub extract: bool,
}

#[derive(Debug, Clone)]
pub struct MemAnnot {
    pub kind: AnnotKind,
    pub quads: Vec<Quad>,
    pub bounds: Rect,
    pub color: ColorSample,
    pub contents: Option<String>,
    /// Number of appearance regenerations.
    pub updated: u32,
}

impl MemAnnot {
    pub fn markup(kind: AnnotKind, quads: Vec<Quad>, color: ColorSample) -> Self {
        Self {
            kind,
            quads,
            bounds: rect(0.0, 0.0, 0.0, 0.0),
            color,
            contents: None,
            updated: 0,
        }
    }

    pub fn markup_with_contents(
        kind: AnnotKind,
        quads: Vec<Quad>,
        color: ColorSample,
        contents: &str,
    ) -> Self {
        Self {
            contents: Some(contents.to_string()),
            ..Self::markup(kind, quads, color)
        }
    }

    pub fn note(x: f32, y: f32, contents: Option<&str>) -> Self {
        Self {
            kind: AnnotKind::Text,
            quads: Vec::new(),
            bounds: rect(x, y, x + 24.0, y + 24.0),
            color: ColorSample::default(),
            contents: contents.map(str::to_string),
            updated: 0,
        }
    }

    /// An annotation kind the core must ignore (stamp, link, ...).
    pub fn other() -> Self {
        Self {
            kind: AnnotKind::Other,
            quads: Vec::new(),
            bounds: rect(0.0, 0.0, 10.0, 10.0),
            color: ColorSample::default(),
            contents: None,
            updated: 0,
        }
    }
}

impl NativeAnnotation for MemAnnot {
    fn kind(&self) -> AnnotKind {
        self.kind
    }

    fn quads(&self) -> NativeResult<Vec<Quad>> {
        Ok(self.quads.clone())
    }

    fn bounds(&self) -> NativeResult<Rect> {
        Ok(self.bounds)
    }

    fn color(&self) -> NativeResult<ColorSample> {
        Ok(self.color)
    }

    fn contents(&self) -> NativeResult<Option<String>> {
        Ok(self.contents.clone())
    }

    fn set_quads(&mut self, quads: &[Quad]) -> NativeResult<()> {
        self.quads = quads.to_vec();
        Ok(())
    }

    fn set_bounds(&mut self, rect: Rect) -> NativeResult<()> {
        self.bounds = rect;
        Ok(())
    }

    fn set_color(&mut self, rgb: [f32; 3]) -> NativeResult<()> {
        self.color = ColorSample::rgb(rgb[0], rgb[1], rgb[2]);
        Ok(())
    }

    fn set_contents(&mut self, contents: &str) -> NativeResult<()> {
        self.contents = Some(contents.to_string());
        Ok(())
    }

    fn update(&mut self) -> NativeResult<()> {
        self.updated += 1;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemPage {
    pub annots: Vec<MemAnnot>,
    /// Text regions returned by `copy_selection` once the text layer has
    /// been extracted.
    pub text_regions: Vec<(Rect, String)>,
    pub text_ready: bool,
    pub extract_calls: u32,
    created: usize,
    pub faults: Faults,
}

impl MemPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_annots(annots: Vec<MemAnnot>) -> Self {
        Self {
            annots,
            ..Self::default()
        }
    }

    pub fn add_text_region(&mut self, region: Rect, text: &str) {
        self.text_regions.push((region, text.to_string()));
    }
}

impl NativePage for MemPage {
    type Annot = MemAnnot;

    fn annotation_count(&self) -> NativeResult<usize> {
        Ok(self.annots.len())
    }

    fn annotation(&self, index: usize) -> NativeResult<&MemAnnot> {
        if self.faults.annotation_at == Some(index) {
            return Err(NativeError::new("injected annotation fault"));
        }
        self.annots
            .get(index)
            .ok_or_else(|| NativeError::new("annotation index out of range"))
    }

    fn annotation_mut(&mut self, index: usize) -> NativeResult<&mut MemAnnot> {
        if self.faults.annotation_at == Some(index) {
            return Err(NativeError::new("injected annotation fault"));
        }
        self.annots
            .get_mut(index)
            .ok_or_else(|| NativeError::new("annotation index out of range"))
    }

    fn create_annotation(&mut self, kind: AnnotKind) -> NativeResult<&mut MemAnnot> {
        let attempt = self.created;
        self.created += 1;
        if self.faults.create_at == Some(attempt) {
            return Err(NativeError::new("injected create fault"));
        }

        self.annots.push(MemAnnot {
            kind,
            quads: Vec::new(),
            bounds: rect(0.0, 0.0, 0.0, 0.0),
            color: ColorSample::default(),
            contents: None,
            updated: 0,
        });
        Ok(self.annots.last_mut().unwrap())
    }

    fn delete_annotation(&mut self, index: usize) -> NativeResult<()> {
        if index >= self.annots.len() {
            return Err(NativeError::new("annotation index out of range"));
        }
        self.annots.remove(index);
        Ok(())
    }

    fn text_layer_ready(&self) -> bool {
        self.text_ready
    }

    fn extract_text_layer(&mut self) -> NativeResult<()> {
        if self.faults.extract {
            return Err(NativeError::new("injected text extraction fault"));
        }
        self.text_ready = true;
        self.extract_calls += 1;
        Ok(())
    }

    fn copy_selection(&self, span: Rect) -> NativeResult<Option<String>> {
        if !self.text_ready {
            return Ok(None);
        }

        let mut out = String::new();
        for (region, text) in &self.text_regions {
            if intersects(region, &span) {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(text);
            }
        }
        Ok(if out.is_empty() { None } else { Some(out) })
    }
}

fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Axis-aligned quad in native space.
pub fn quad(x0: f32, y0: f32, x1: f32, y1: f32) -> Quad {
    Quad {
        ul: Point { x: x0, y: y1 },
        ur: Point { x: x1, y: y1 },
        ll: Point { x: x0, y: y0 },
        lr: Point { x: x1, y: y0 },
    }
}

pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
    Rect { x0, y0, x1, y1 }
}
