//! Input-document boundary for the CLI: a scene is the area, the anchor
//! list, and optional placement options. Parsed leniently (json5, so
//! hand-written files may carry comments and trailing commas) but validated
//! strictly: the engine core assumes finite geometry, so non-finite values
//! are rejected here. Empty-text anchors are legal input; the engine skips
//! them during grouping.

use serde::Deserialize;
use thiserror::Error;

use crate::config::PlacementOptions;
use crate::model::{Anchor, AreaSize};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene parse error: {0}")]
    Parse(#[from] json5::Error),
    #[error("area size must be finite and positive, got {width}x{height}")]
    BadArea { width: f64, height: f64 },
    #[error("anchor {index} ({text:?}) has non-finite geometry")]
    NonFiniteAnchor { index: usize, text: String },
}

/// One placement request as read from disk or stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub area: AreaSize,
    pub anchors: Vec<Anchor>,
    #[serde(default)]
    pub options: PlacementOptions,
}

pub fn parse_scene(input: &str) -> Result<Scene, SceneError> {
    let scene: Scene = json5::from_str(input)?;
    if !scene.area.width.is_finite()
        || !scene.area.height.is_finite()
        || scene.area.width < 0.0
        || scene.area.height < 0.0
    {
        return Err(SceneError::BadArea {
            width: scene.area.width,
            height: scene.area.height,
        });
    }
    for (index, anchor) in scene.anchors.iter().enumerate() {
        let finite = anchor.x.is_finite()
            && anchor.y.is_finite()
            && anchor.width.is_finite()
            && anchor.height.is_finite();
        if !finite {
            return Err(SceneError::NonFiniteAnchor {
                index,
                text: anchor.text.clone(),
            });
        }
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json5_with_comments_and_defaults() {
        let scene = parse_scene(
            r#"{
                // usable plot rectangle
                area: { width: 640, height: 480 },
                anchors: [
                    { x: 10, y: 20, text: "alpha", width: 32, height: 12 },
                ],
            }"#,
        )
        .expect("scene should parse");
        assert_eq!(scene.anchors.len(), 1);
        assert_eq!(scene.options.rings, 5);
    }

    #[test]
    fn rejects_non_finite_anchor() {
        let err = parse_scene(
            r#"{
                area: { width: 100, height: 100 },
                anchors: [{ x: Infinity, y: 0, text: "inf", width: 10, height: 10 }],
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::NonFiniteAnchor { index: 0, .. }));
    }

    #[test]
    fn rejects_negative_area() {
        let err = parse_scene(
            r#"{ area: { width: -5, height: 100 }, anchors: [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::BadArea { .. }));
    }
}
