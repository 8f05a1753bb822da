//! Candidate generation: deterministic rings of trial positions around one
//! anchor group. Pure functions of (group, area, options), no side effects.

use std::f64::consts::TAU;

use crate::config::PlacementOptions;
use crate::model::AreaSize;

use super::{AREA_MARGIN, AnchorGroup, Rect, rects_overlap};

/// Angle count of the innermost ring; denser than the configured sweep so the
/// closest band is explored thoroughly before moving outward.
const PRIMARY_ANGLE_COUNT: u32 = 64;
/// Minimum angle count kept while expanding rings thin out.
const MIN_RING_ANGLES: u32 = 8;
/// Radial step between fallback rings, in pixels.
const FALLBACK_RING_STEP: f64 = 5.0;

/// A proposed top-left position for the group's label rectangle. Ephemeral:
/// created, scored, and discarded within the placement of a single group.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub x: f64,
    pub y: f64,
    /// Reserved; generation never rotates boxes.
    pub rotation: f64,
    pub score: f64,
}

impl Candidate {
    fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            score: 0.0,
        }
    }
}

/// All candidate positions for one group, concatenated band by band:
/// primary ring, expanding rings, fallback rings, half-step rings.
///
/// Two hard filters apply independently of scoring: a candidate whose
/// rectangle center is closer than the exclusion radius to the anchor is
/// discarded, as is one whose rectangle misses the area entirely (fallback
/// rings are unclamped and can drift arbitrarily far out).
pub(crate) fn generate(
    group: &AnchorGroup,
    area: AreaSize,
    options: &PlacementOptions,
) -> Vec<Candidate> {
    let r_excl = options.exclusion_radius();
    let mut out = primary_ring(group, area, r_excl);
    out.extend(expanding_rings(group, area, r_excl, options));
    out.extend(fallback_rings(group, r_excl, options));
    out.extend(half_step_rings(group, area, options));

    let area_rect: Rect = (0.0, 0.0, area.width, area.height);
    out.retain(|candidate| {
        let (cx, cy) = rect_center(candidate, group);
        let dx = cx - group.x;
        let dy = cy - group.y;
        if (dx * dx + dy * dy).sqrt() < r_excl {
            return false;
        }
        rects_overlap(&(candidate.x, candidate.y, group.width, group.height), &area_rect)
    });
    out
}

fn rect_center(candidate: &Candidate, group: &AnchorGroup) -> (f64, f64) {
    (
        candidate.x + group.width / 2.0,
        candidate.y + group.height / 2.0,
    )
}

/// Top-left position putting the rectangle's nearest edge at `radius` from
/// the anchor center along `angle`. A mostly-horizontal angle offsets a
/// vertical edge and centers the box on the ray vertically; a
/// mostly-vertical angle does the opposite.
fn edge_offset_position(group: &AnchorGroup, angle: f64, radius: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    let px = group.x + radius * cos;
    let py = group.y + radius * sin;
    if cos.abs() > sin.abs() {
        let x = if cos > 0.0 { px } else { px - group.width };
        (x, py - group.height / 2.0)
    } else {
        let y = if sin > 0.0 { py } else { py - group.height };
        (px - group.width / 2.0, y)
    }
}

/// Clamp a top-left position so the whole rectangle stays inside the area's
/// 1 px inner margin.
fn clamp_to_area(x: f64, y: f64, group: &AnchorGroup, area: AreaSize) -> (f64, f64) {
    let max_x = (area.width - AREA_MARGIN - group.width).max(AREA_MARGIN);
    let max_y = (area.height - AREA_MARGIN - group.height).max(AREA_MARGIN);
    (x.clamp(AREA_MARGIN, max_x), y.clamp(AREA_MARGIN, max_y))
}

fn ring_at(
    group: &AnchorGroup,
    radius: f64,
    angle_count: u32,
    phase: f64,
    clamp: Option<AreaSize>,
) -> Vec<Candidate> {
    let count = angle_count.max(1);
    let step = TAU / count as f64;
    (0..count)
        .map(|i| {
            let angle = (i as f64 + phase) * step;
            let (x, y) = edge_offset_position(group, angle, radius);
            match clamp {
                Some(area) => {
                    let (x, y) = clamp_to_area(x, y, group, area);
                    Candidate::at(x, y)
                }
                None => Candidate::at(x, y),
            }
        })
        .collect()
}

/// Densest band: one candidate per angle with the nearest rectangle edge
/// exactly at the exclusion radius.
fn primary_ring(group: &AnchorGroup, area: AreaSize, r_excl: f64) -> Vec<Candidate> {
    ring_at(group, r_excl, PRIMARY_ANGLE_COUNT, 0.0, Some(area))
}

/// Rings widening outward from the exclusion radius, with angle counts
/// shrinking per ring.
fn expanding_rings(
    group: &AnchorGroup,
    area: AreaSize,
    r_excl: f64,
    options: &PlacementOptions,
) -> Vec<Candidate> {
    let mut out = Vec::new();
    for ring in 1..options.rings {
        let radius = r_excl * (1.0 + 0.5 * ring as f64);
        let count = MIN_RING_ANGLES.max(options.angles_per_ring / (ring + 1));
        out.extend(ring_at(group, radius, count, 0.0, Some(area)));
    }
    out
}

/// Unclamped rings at fixed 5 px increments beyond the exclusion radius.
/// Only ever selected when everything closer fails the overlap and
/// exclusion checks.
fn fallback_rings(group: &AnchorGroup, r_excl: f64, options: &PlacementOptions) -> Vec<Candidate> {
    let mut out = Vec::new();
    for ring in 1..=options.rings {
        let radius = r_excl + FALLBACK_RING_STEP * ring as f64;
        out.extend(ring_at(group, radius, options.angles_per_ring, 0.0, None));
    }
    out
}

/// Same radii as the base `radius * ring` progression, phase-shifted by half
/// an angle step to fill angular gaps between the other bands.
fn half_step_rings(group: &AnchorGroup, area: AreaSize, options: &PlacementOptions) -> Vec<Candidate> {
    let mut out = Vec::new();
    for ring in 1..=options.rings {
        let radius = options.radius * ring as f64;
        out.extend(ring_at(
            group,
            radius,
            options.angles_per_ring,
            0.5,
            Some(area),
        ));
    }
    out
}
