use serde::{Deserialize, Serialize};

/// The usable pixel rectangle labels must be placed inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaSize {
    pub width: f64,
    pub height: f64,
}

impl AreaSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point that wants a nearby text label.
///
/// Anchors are read-only inputs: the engine never mutates them and holds no
/// reference to them past the end of a placement pass. `width`/`height` are
/// the measured pixel size of the rendered label text; measuring is the
/// caller's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub width: f64,
    pub height: f64,
    /// Pass-through styling hint for the renderer; ignored by placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
}

impl Anchor {
    pub fn new(x: f64, y: f64, text: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            width,
            height,
            fill_color: None,
        }
    }
}

/// A committed label position. `x`/`y` is the top-left corner of the label
/// rectangle in the same pixel space as the input anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Reserved; placement currently never rotates boxes.
    pub rotation: f64,
    pub text: String,
    /// Index into the caller's anchor slice of the owning group's first
    /// member. A lookup relation only, never ownership.
    pub anchor_index: usize,
}

impl LabelBox {
    /// The label rectangle as `(x, y, width, height)`.
    pub fn rect(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }
}
