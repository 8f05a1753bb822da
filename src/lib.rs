#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dump;
pub mod model;
pub mod placement;
pub mod scene;

pub use config::PlacementOptions;
pub use model::{Anchor, AreaSize, LabelBox};
pub use placement::{Placement, place_labels};

#[cfg(feature = "cli")]
pub use cli::run;
