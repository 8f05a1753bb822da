use serde::{Deserialize, Serialize};

/// Tunable knobs for one placement pass.
///
/// Every scoring weight lives here rather than as an inline literal so the
/// terms stay tunable and testable in isolation. Omitted fields in a
/// deserialized document fall back to the defaults below; options are
/// immutable for the duration of one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    /// Base radial step of the half-step candidate rings, in pixels.
    pub radius: f64,
    /// Number of rings per candidate band.
    pub rings: u32,
    /// Angle count on the expanding/fallback rings (the innermost ring uses
    /// a denser fixed sweep).
    pub angles_per_ring: u32,
    /// Extra per-side padding stacked on the fixed 2 px index margin, both
    /// when committing rectangles and when querying for overlaps.
    pub padding: f64,
    /// Radius of the rendered point marker footprint.
    pub point_radius: f64,
    /// Clearance kept between a label rectangle and any point footprint.
    pub boundary_buffer: f64,
    /// Penalty per already-placed rectangle the candidate collides with.
    /// Dominates every other term; a single collision disqualifies.
    pub overlap_penalty: f64,
    /// Penalty per foreign anchor point covered by the candidate rectangle.
    pub point_penalty: f64,
    /// Flat penalty when the candidate crosses the 1 px inner margin.
    pub out_of_bounds_penalty: f64,
    /// Reserved for a future angular preference; not read by scoring.
    pub ideal_angle_bonus: f64,
    /// Record per-candidate diagnostics for the whole pass.
    pub debug: bool,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            radius: 10.0,
            rings: 5,
            angles_per_ring: 32,
            padding: 0.0,
            point_radius: 5.0,
            boundary_buffer: 2.0,
            overlap_penalty: 100_000.0,
            point_penalty: 500.0,
            out_of_bounds_penalty: 0.0,
            ideal_angle_bonus: 0.0,
            debug: false,
        }
    }
}

impl PlacementOptions {
    /// Minimum allowed distance between a candidate center and its anchor,
    /// and the disk radius kept clear around every foreign anchor.
    pub fn exclusion_radius(&self) -> f64 {
        self.point_radius + self.boundary_buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = PlacementOptions::default();
        assert_eq!(options.radius, 10.0);
        assert_eq!(options.rings, 5);
        assert_eq!(options.angles_per_ring, 32);
        assert_eq!(options.overlap_penalty, 100_000.0);
        assert_eq!(options.point_penalty, 500.0);
        assert_eq!(options.exclusion_radius(), 7.0);
        assert!(!options.debug);
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let options: PlacementOptions = json5::from_str("{ rings: 3, debug: true }").unwrap();
        assert_eq!(options.rings, 3);
        assert!(options.debug);
        assert_eq!(options.radius, 10.0);
        assert_eq!(options.point_penalty, 500.0);
    }
}
