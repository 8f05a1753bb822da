//! Multi-criterion candidate scoring. Pure: a candidate is evaluated against
//! the committed-rectangle index, the full anchor set, and the area bounds,
//! yielding a signed total plus a per-term breakdown for diagnostics.

use serde::Serialize;

use crate::config::PlacementOptions;
use crate::model::{Anchor, AreaSize};

use super::{
    AREA_MARGIN, AnchorGroup, INDEX_MARGIN, Rect, grid::LabelGrid, inflate_rect, overlap_area,
    point_in_rect, rects_overlap,
};
use super::candidates::Candidate;

/// Distance from an area edge below which the border penalty kicks in.
const BORDER_THRESHOLD: f64 = 10.0;
/// Scale of the quadratic border-proximity penalty.
const BORDER_PENALTY_SCALE: f64 = 100.0;
/// Maximum bonus for sitting on the area's geometric center.
const CENTER_BONUS_MAX: f64 = 10.0;
/// Weight on the candidate-center-to-anchor distance term.
const DISTANCE_WEIGHT: f64 = 10.0;

/// Signed per-term contributions summing to a candidate's total score.
/// Penalty fields are zero or negative, `center_bonus` zero or positive.
/// Retained only when diagnostics are enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Collisions with committed rectangles, and exclusion-disk violations
    /// against foreign anchors; either one is disqualifying by magnitude.
    pub overlap_penalty: f64,
    /// Foreign anchor points covered by the label rectangle.
    pub point_penalty: f64,
    /// Quadratic push away from the area edges.
    pub border_penalty: f64,
    /// Linear pull toward the area's geometric center.
    pub center_bonus: f64,
    /// Flat charge for crossing the inner margin.
    pub out_of_bounds_penalty: f64,
    /// Linear pull toward the anchor.
    pub distance_penalty: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.overlap_penalty
            + self.point_penalty
            + self.border_penalty
            + self.center_bonus
            + self.out_of_bounds_penalty
            + self.distance_penalty
    }
}

/// True when the rectangle violates the exclusion disk around `(ax, ay)`:
/// either a corner falls inside the disk or the rectangle overlaps the
/// disk's bounding box.
fn violates_exclusion(rect: &Rect, ax: f64, ay: f64, radius: f64) -> bool {
    let corners = [
        (rect.0, rect.1),
        (rect.0 + rect.2, rect.1),
        (rect.0, rect.1 + rect.3),
        (rect.0 + rect.2, rect.1 + rect.3),
    ];
    for (cx, cy) in corners {
        let dx = cx - ax;
        let dy = cy - ay;
        if (dx * dx + dy * dy).sqrt() < radius {
            return true;
        }
    }
    let disk_box: Rect = (ax - radius, ay - radius, radius * 2.0, radius * 2.0);
    overlap_area(rect, &disk_box) > 0.0
}

/// Score one candidate for `group`. `placed` holds the padded rectangles
/// already committed this pass, addressed by the indices `grid` returns.
pub(crate) fn score_candidate(
    candidate: &Candidate,
    group: &AnchorGroup,
    anchors: &[Anchor],
    placed: &[Rect],
    grid: &LabelGrid,
    area: AreaSize,
    options: &PlacementOptions,
) -> ScoreBreakdown {
    let rect: Rect = (candidate.x, candidate.y, group.width, group.height);
    let padded = inflate_rect(&rect, INDEX_MARGIN + options.padding);
    let mut breakdown = ScoreBreakdown::default();

    // Collisions with already-placed labels dominate everything else.
    let mut collisions = 0u32;
    for idx in grid.query(&padded) {
        if rects_overlap(&padded, &placed[idx]) {
            collisions += 1;
        }
    }
    breakdown.overlap_penalty -= options.overlap_penalty * f64::from(collisions);

    // Foreign anchors: covered points cost a fixed fee, exclusion-disk
    // violations are disqualifying outright.
    let r_excl = options.exclusion_radius();
    for (idx, anchor) in anchors.iter().enumerate() {
        if group.members.contains(&idx) {
            continue;
        }
        if point_in_rect(anchor.x, anchor.y, &rect) {
            breakdown.point_penalty -= options.point_penalty;
        }
        if violates_exclusion(&rect, anchor.x, anchor.y, r_excl) {
            breakdown.overlap_penalty -= options.overlap_penalty;
        }
    }

    let cx = rect.0 + rect.2 / 2.0;
    let cy = rect.1 + rect.3 / 2.0;

    // Border proximity: quadratic ramp inside the threshold band. A center
    // that is already outside the area ramps past the full penalty.
    let edge_dist = cx.min(cy).min(area.width - cx).min(area.height - cy);
    if edge_dist < BORDER_THRESHOLD {
        let ratio = (BORDER_THRESHOLD - edge_dist) / BORDER_THRESHOLD;
        breakdown.border_penalty -= BORDER_PENALTY_SCALE * ratio * ratio;
    }

    // Center bonus, normalized by the half-diagonal so the corners get zero.
    let half_diag = ((area.width / 2.0).powi(2) + (area.height / 2.0).powi(2)).sqrt();
    if half_diag > 0.0 {
        let dx = cx - area.width / 2.0;
        let dy = cy - area.height / 2.0;
        let center_dist = (dx * dx + dy * dy).sqrt();
        breakdown.center_bonus += CENTER_BONUS_MAX * (1.0 - center_dist / half_diag).max(0.0);
    }

    let in_bounds = rect.0 >= AREA_MARGIN
        && rect.1 >= AREA_MARGIN
        && rect.0 + rect.2 <= area.width - AREA_MARGIN
        && rect.1 + rect.3 <= area.height - AREA_MARGIN;
    if !in_bounds {
        breakdown.out_of_bounds_penalty -= options.out_of_bounds_penalty;
    }

    let dx = cx - group.x;
    let dy = cy - group.y;
    breakdown.distance_penalty -= DISTANCE_WEIGHT * (dx * dx + dy * dy).sqrt();

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_at(x: f64, y: f64, w: f64, h: f64) -> AnchorGroup {
        AnchorGroup {
            x,
            y,
            text: "g".to_string(),
            width: w,
            height: h,
            members: vec![0],
        }
    }

    fn candidate_at(x: f64, y: f64) -> Candidate {
        Candidate {
            x,
            y,
            rotation: 0.0,
            score: 0.0,
        }
    }

    fn score_simple(
        candidate: &Candidate,
        group: &AnchorGroup,
        anchors: &[Anchor],
        placed: &[Rect],
        options: &PlacementOptions,
    ) -> ScoreBreakdown {
        let mut grid = LabelGrid::new(48.0);
        for (idx, rect) in placed.iter().enumerate() {
            grid.insert(idx, rect);
        }
        score_candidate(
            candidate,
            group,
            anchors,
            placed,
            &grid,
            AreaSize::new(400.0, 300.0),
            options,
        )
    }

    #[test]
    fn collision_with_placed_label_disqualifies() {
        let group = group_at(200.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions::default();
        let candidate = candidate_at(210.0, 150.0);
        let blocking = inflate_rect(&(205.0, 145.0, 30.0, 20.0), INDEX_MARGIN);
        let hit = score_simple(&candidate, &group, &[], &[blocking], &options);
        let clear = score_simple(&candidate, &group, &[], &[], &options);
        assert!(hit.total() <= clear.total() - options.overlap_penalty + 1.0);
        assert_eq!(hit.overlap_penalty, -options.overlap_penalty);
    }

    #[test]
    fn covered_foreign_point_costs_point_penalty() {
        let group = group_at(200.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions {
            // Disk veto off so the coverage term is observable on its own.
            point_radius: 0.0,
            boundary_buffer: 0.0,
            ..PlacementOptions::default()
        };
        let candidate = candidate_at(210.0, 150.0);
        let anchors = vec![
            Anchor::new(200.0, 150.0, "own", 20.0, 10.0),
            Anchor::new(215.0, 155.0, "covered", 8.0, 8.0),
        ];
        let with_point = score_simple(&candidate, &group, &anchors, &[], &options);
        let without = score_simple(&candidate, &group, &anchors[..1], &[], &options);
        let delta = without.total() - with_point.total();
        assert!(
            (delta - options.point_penalty).abs() < 1e-6,
            "coverage should cost exactly the point penalty, got {delta}"
        );
    }

    #[test]
    fn exclusion_disk_violation_is_vetoed() {
        let group = group_at(200.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions::default();
        let candidate = candidate_at(210.0, 147.0);
        // Foreign anchor right next to the candidate rectangle.
        let anchors = vec![
            Anchor::new(200.0, 150.0, "own", 20.0, 10.0),
            Anchor::new(212.0, 160.0, "near", 8.0, 8.0),
        ];
        let breakdown = score_simple(&candidate, &group, &anchors, &[], &options);
        assert!(breakdown.overlap_penalty <= -options.overlap_penalty);
    }

    #[test]
    fn own_group_anchor_never_vetoes() {
        let group = group_at(200.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions::default();
        // Nearest edge exactly on the exclusion radius, directly right.
        let candidate = candidate_at(207.0, 145.0);
        let anchors = vec![Anchor::new(200.0, 150.0, "own", 20.0, 10.0)];
        let breakdown = score_simple(&candidate, &group, &anchors, &[], &options);
        assert_eq!(breakdown.overlap_penalty, 0.0);
        assert_eq!(breakdown.point_penalty, 0.0);
    }

    #[test]
    fn border_penalty_applies_inside_threshold_band() {
        let group = group_at(50.0, 50.0, 10.0, 10.0);
        let options = PlacementOptions::default();
        let near_edge = score_simple(&candidate_at(1.0, 45.0), &group, &[], &[], &options);
        let interior = score_simple(&candidate_at(30.0, 45.0), &group, &[], &[], &options);
        assert!(near_edge.border_penalty < 0.0);
        assert_eq!(interior.border_penalty, 0.0);
    }

    #[test]
    fn center_bonus_peaks_at_area_center() {
        let group = group_at(150.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions::default();
        let centered = score_simple(&candidate_at(190.0, 145.0), &group, &[], &[], &options);
        let offset = score_simple(&candidate_at(330.0, 145.0), &group, &[], &[], &options);
        assert!(centered.center_bonus > offset.center_bonus);
        assert!(centered.center_bonus <= CENTER_BONUS_MAX);
        assert!(offset.center_bonus >= 0.0);
    }

    #[test]
    fn closer_candidates_score_higher() {
        let group = group_at(200.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions::default();
        let near = score_simple(&candidate_at(210.0, 145.0), &group, &[], &[], &options);
        let far = score_simple(&candidate_at(260.0, 145.0), &group, &[], &[], &options);
        assert!(near.total() > far.total());
        assert!(near.distance_penalty > far.distance_penalty);
    }

    #[test]
    fn out_of_bounds_penalty_is_flat_and_configurable() {
        let group = group_at(200.0, 150.0, 20.0, 10.0);
        let options = PlacementOptions {
            out_of_bounds_penalty: 42.0,
            ..PlacementOptions::default()
        };
        let outside = score_simple(&candidate_at(390.0, 145.0), &group, &[], &[], &options);
        let inside = score_simple(&candidate_at(210.0, 145.0), &group, &[], &[], &options);
        assert_eq!(outside.out_of_bounds_penalty, -42.0);
        assert_eq!(inside.out_of_bounds_penalty, 0.0);
    }

    #[test]
    fn breakdown_total_sums_all_terms() {
        let breakdown = ScoreBreakdown {
            overlap_penalty: -100_000.0,
            point_penalty: -500.0,
            border_penalty: -25.0,
            center_bonus: 4.0,
            out_of_bounds_penalty: 0.0,
            distance_penalty: -70.0,
        };
        assert_eq!(breakdown.total(), -100_591.0);
    }
}
