//! The label-placement engine: anchor grouping, sequential candidate
//! placement, and the shared rectangle geometry helpers.
//!
//! All coordinates are pixels with a top-left origin; rectangles are
//! axis-aligned `(x, y, width, height)` tuples.

pub(crate) mod candidates;
mod diagnostics;
mod grid;
mod score;

pub use candidates::Candidate;
pub use diagnostics::{GroupDiagnostics, ScoredCandidate};
pub use score::ScoreBreakdown;

use crate::config::PlacementOptions;
use crate::model::{Anchor, AreaSize, LabelBox};

use grid::LabelGrid;

pub(crate) type Rect = (f64, f64, f64, f64);

/// Inner margin between label rectangles and the area edge.
pub(crate) const AREA_MARGIN: f64 = 1.0;
/// Fixed padding applied to committed rectangles in the spatial index.
pub(crate) const INDEX_MARGIN: f64 = 2.0;
/// Cell size of the per-pass spatial index.
const GRID_CELL: f64 = 48.0;

/// Anchors sharing the same rounded position, merged into one placement unit.
#[derive(Debug, Clone)]
pub(crate) struct AnchorGroup {
    /// Exact (unrounded) position of the first member.
    pub x: f64,
    pub y: f64,
    /// Member texts joined with ", ".
    pub text: String,
    /// Per-axis maximum of the member label boxes.
    pub width: f64,
    pub height: f64,
    /// Indices into the caller's anchor slice, first member first.
    pub members: Vec<usize>,
}

/// Result of one placement pass. `diagnostics` is `Some` exactly when the
/// pass ran with `options.debug`.
#[derive(Debug, Clone)]
pub struct Placement {
    /// Placed labels in group-processing order (ascending group y).
    pub labels: Vec<LabelBox>,
    pub diagnostics: Option<Vec<GroupDiagnostics>>,
}

pub(crate) fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    let x0 = a.0.max(b.0);
    let y0 = a.1.max(b.1);
    let x1 = (a.0 + a.2).min(b.0 + b.2);
    let y1 = (a.1 + a.3).min(b.1 + b.3);
    let w = (x1 - x0).max(0.0);
    let h = (y1 - y0).max(0.0);
    w * h
}

pub(crate) fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    overlap_area(a, b) > 0.0
}

pub(crate) fn inflate_rect(rect: &Rect, pad: f64) -> Rect {
    if pad <= 0.0 {
        return *rect;
    }
    (
        rect.0 - pad,
        rect.1 - pad,
        rect.2 + pad * 2.0,
        rect.3 + pad * 2.0,
    )
}

pub(crate) fn point_in_rect(x: f64, y: f64, rect: &Rect) -> bool {
    x >= rect.0 && x <= rect.0 + rect.2 && y >= rect.1 && y <= rect.1 + rect.3
}

/// Bucket anchors by rounded position and merge coincident ones. Anchors
/// with empty text or non-finite geometry are skipped; groups come back
/// sorted by their first member's y, ties keeping first-appearance order.
fn group_anchors(anchors: &[Anchor]) -> Vec<AnchorGroup> {
    use std::collections::HashMap;

    let mut groups: Vec<AnchorGroup> = Vec::new();
    let mut by_key: HashMap<(i64, i64), usize> = HashMap::new();

    for (idx, anchor) in anchors.iter().enumerate() {
        if anchor.text.is_empty() {
            continue;
        }
        let finite = anchor.x.is_finite()
            && anchor.y.is_finite()
            && anchor.width.is_finite()
            && anchor.height.is_finite();
        if !finite {
            continue;
        }
        let key = (anchor.x.round() as i64, anchor.y.round() as i64);
        match by_key.get(&key) {
            Some(&group_idx) => {
                let group = &mut groups[group_idx];
                group.text.push_str(", ");
                group.text.push_str(&anchor.text);
                group.width = group.width.max(anchor.width);
                group.height = group.height.max(anchor.height);
                group.members.push(idx);
            }
            None => {
                by_key.insert(key, groups.len());
                groups.push(AnchorGroup {
                    x: anchor.x,
                    y: anchor.y,
                    text: anchor.text.clone(),
                    width: anchor.width,
                    height: anchor.height,
                    members: vec![idx],
                });
            }
        }
    }

    // Stable by construction: ties keep bucket-creation order.
    groups.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal));
    groups
}

/// Run one placement pass: for each anchor group in fixed order, generate
/// candidates, score them against everything committed so far, and either
/// commit the best one or drop the group when even the best candidate
/// collides or violates an exclusion disk.
///
/// Never fails; degenerate input (no anchors, zero-size area) yields an
/// empty result. The engine holds no state across passes.
pub fn place_labels(area: AreaSize, anchors: &[Anchor], options: &PlacementOptions) -> Placement {
    let mut labels: Vec<LabelBox> = Vec::new();
    let mut diagnostics: Option<Vec<GroupDiagnostics>> = options.debug.then(Vec::new);

    if anchors.is_empty() || area.width <= 0.0 || area.height <= 0.0 {
        return Placement {
            labels,
            diagnostics,
        };
    }

    let groups = group_anchors(anchors);
    let mut grid = LabelGrid::new(GRID_CELL);
    let mut placed_rects: Vec<Rect> = Vec::new();
    let index_pad = INDEX_MARGIN + options.padding;

    for group in &groups {
        let mut cands = candidates::generate(group, area, options);
        let mut best: Option<(usize, f64)> = None;
        let mut recorded: Vec<ScoredCandidate> = Vec::new();

        for (idx, candidate) in cands.iter_mut().enumerate() {
            let breakdown = score::score_candidate(
                candidate,
                group,
                anchors,
                &placed_rects,
                &grid,
                area,
                options,
            );
            candidate.score = breakdown.total();
            // Strict comparison: the first of equal scores wins, keeping the
            // selection deterministic in generation order.
            if best.map(|(_, s)| candidate.score > s).unwrap_or(true) {
                best = Some((idx, candidate.score));
            }
            if diagnostics.is_some() {
                recorded.push(ScoredCandidate {
                    x: candidate.x,
                    y: candidate.y,
                    rotation: candidate.rotation,
                    score: candidate.score,
                    breakdown,
                });
            }
        }

        let winner = best.filter(|&(_, score)| score > -options.overlap_penalty);
        let placed_before = diagnostics.as_ref().map(|_| labels.clone());

        match winner {
            Some((idx, _)) => {
                let candidate = &cands[idx];
                let label = LabelBox {
                    x: candidate.x,
                    y: candidate.y,
                    width: group.width,
                    height: group.height,
                    rotation: candidate.rotation,
                    text: group.text.clone(),
                    anchor_index: group.members[0],
                };
                let padded = inflate_rect(&label.rect(), index_pad);
                grid.insert(placed_rects.len(), &padded);
                placed_rects.push(padded);
                labels.push(label);
                if let Some(diag) = diagnostics.as_mut() {
                    diag.push(GroupDiagnostics {
                        anchor: group_as_anchor(group, anchors),
                        candidates: recorded,
                        selected: Some(idx),
                        placed_before: placed_before.unwrap_or_default(),
                    });
                }
            }
            None => {
                tracing::debug!(
                    text = %group.text,
                    best_score = best.map(|(_, s)| s),
                    "label unplaceable, dropping"
                );
                if let Some(diag) = diagnostics.as_mut() {
                    diag.push(GroupDiagnostics {
                        anchor: group_as_anchor(group, anchors),
                        candidates: recorded,
                        selected: None,
                        placed_before: placed_before.unwrap_or_default(),
                    });
                }
            }
        }
    }

    tracing::debug!(
        groups = groups.len(),
        placed = labels.len(),
        "placement pass complete"
    );

    Placement {
        labels,
        diagnostics,
    }
}

fn group_as_anchor(group: &AnchorGroup, anchors: &[Anchor]) -> Anchor {
    Anchor {
        x: group.x,
        y: group.y,
        text: group.text.clone(),
        width: group.width,
        height: group.height,
        fill_color: anchors[group.members[0]].fill_color.clone(),
    }
}
