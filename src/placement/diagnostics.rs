//! Optional side-channel recording of everything the scorer considered.
//! Never affects placement; costs nothing unless `options.debug` is set.

use serde::Serialize;

use crate::model::{Anchor, LabelBox};

use super::score::ScoreBreakdown;

/// One candidate together with its score detail.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Everything considered while placing one anchor group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDiagnostics {
    /// The synthetic anchor the group was placed for (merged text, per-axis
    /// max box).
    pub anchor: Anchor,
    /// Every candidate in generation order.
    pub candidates: Vec<ScoredCandidate>,
    /// Index into `candidates` of the committed winner; `None` when the
    /// group's label was dropped as unplaceable.
    pub selected: Option<usize>,
    /// Labels already committed when this group was processed.
    pub placed_before: Vec<LabelBox>,
}
