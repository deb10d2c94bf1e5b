//! Pipeline conversions module
//!
//! This module contains orchestration logic for turning tile rasters into
//! packed tiles, raw grids and tile databases.

mod terrain;
mod timing;
pub mod types;


pub use terrain::TerrainPipeline;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{ConversionConfig, ConversionConfigBuilder};
