use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::model::AreaSize;
use crate::placement::{GroupDiagnostics, Placement};

/// Machine-readable snapshot of a placement pass, for offline inspection of
/// what the scorer saw and chose.
#[derive(Debug, Serialize)]
pub struct PlacementDump {
    pub area_width: f64,
    pub area_height: f64,
    pub labels: Vec<LabelDump>,
    /// Per-group candidate diagnostics; empty when the pass ran without
    /// debug scoring.
    pub groups: Vec<GroupDiagnostics>,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub anchor_index: usize,
}

impl PlacementDump {
    pub fn from_placement(placement: &Placement, area: AreaSize) -> Self {
        let labels = placement
            .labels
            .iter()
            .map(|label| LabelDump {
                text: label.text.clone(),
                x: label.x,
                y: label.y,
                width: label.width,
                height: label.height,
                rotation: label.rotation,
                anchor_index: label.anchor_index,
            })
            .collect();
        PlacementDump {
            area_width: area.width,
            area_height: area.height,
            labels,
            groups: placement.diagnostics.clone().unwrap_or_default(),
        }
    }
}

pub fn write_placement_dump(
    path: &Path,
    placement: &Placement,
    area: AreaSize,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = PlacementDump::from_placement(placement, area);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
