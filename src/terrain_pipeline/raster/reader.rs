use crate::terrain_pipeline::common::error::Result;
use crate::terrain_pipeline::raster::types::{ElevationRaster, WaterMaskRaster};

pub trait RasterReader {
    fn read_elevation(&self, data: &[u8]) -> Result<ElevationRaster>;
    fn read_water_mask(&self, data: &[u8]) -> Result<WaterMaskRaster>;
}
