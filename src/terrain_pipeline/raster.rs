//! Raster loading module
//!
//! This module turns encoded raster files into typed sample grids.

mod reader;
mod tiff_reader;
pub mod types;

pub use reader::RasterReader;
pub use tiff_reader::TiffRasterReader;
pub use types::{ElevationRaster, Raster, WaterMaskRaster};
