//! Raster reader implementation using the tiff library.
//!
//! Copernicus DEM tiles are cloud-optimized GeoTIFFs: the elevation raster ships
//! as 32-bit float samples and the water body mask as 8-bit unsigned samples.
//! Both are normalized here to the integer widths the packer works with.

use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult, Limits};
use tracing::debug;

use crate::terrain_pipeline::common::error::{Result, TerrainError};
use crate::terrain_pipeline::raster::reader::RasterReader;
use crate::terrain_pipeline::raster::types::{ElevationRaster, Raster, WaterMaskRaster};

/// Raster reader backed by the `tiff` crate.
pub struct TiffRasterReader;

/// Decoder buffer limit. Copernicus tiles at 30 arc-seconds are 1200x1200,
/// the 1 arc-second product reaches 3600x3600 float samples.
const DECODE_LIMIT_BYTES: usize = 512 * 1024 * 1024;

impl TiffRasterReader {
    fn decode(data: &[u8]) -> Result<(usize, usize, DecodingResult)> {
        debug!("Decoding TIFF raster, {} bytes", data.len());

        let mut limits = Limits::default();
        limits.decoding_buffer_size = DECODE_LIMIT_BYTES;
        limits.intermediate_buffer_size = DECODE_LIMIT_BYTES;
        limits.ifd_value_size = DECODE_LIMIT_BYTES;

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(|e| TerrainError::UnreadableRaster(e.to_string()))?
            .with_limits(limits);

        let (width, height) = decoder
            .dimensions()
            .map_err(|e| TerrainError::UnreadableRaster(e.to_string()))?;

        let samples = decoder
            .read_image()
            .map_err(|e| TerrainError::UnreadableRaster(e.to_string()))?;

        debug!("Decoded raster: {}x{}", width, height);
        Ok((width as usize, height as usize, samples))
    }
}

impl RasterReader for TiffRasterReader {
    /// Reads an elevation raster.
    ///
    /// Integer samples are narrowed to `i16`; float samples are truncated toward
    /// zero (saturating, NaN becomes 0).
    fn read_elevation(&self, data: &[u8]) -> Result<ElevationRaster> {
        let (width, height, samples) = Self::decode(data)?;

        let data: Vec<i16> = match samples {
            DecodingResult::I16(values) => values,
            DecodingResult::F32(values) => values.into_iter().map(|v| v as i16).collect(),
            DecodingResult::F64(values) => values.into_iter().map(|v| v as i16).collect(),
            DecodingResult::I32(values) => values.into_iter().map(|v| v as i16).collect(),
            DecodingResult::U16(values) => values.into_iter().map(|v| v as i16).collect(),
            DecodingResult::U8(values) => values.into_iter().map(i16::from).collect(),
            DecodingResult::I8(values) => values.into_iter().map(i16::from).collect(),
            _ => {
                return Err(TerrainError::UnsupportedFormat(
                    "elevation raster must hold integer or float samples".to_string(),
                ));
            }
        };

        Raster::new(width, height, data)
    }

    /// Reads a water body mask.
    ///
    /// Unsigned bytes are reinterpreted as `i8`, so nonzero stays nonzero.
    fn read_water_mask(&self, data: &[u8]) -> Result<WaterMaskRaster> {
        let (width, height, samples) = Self::decode(data)?;

        let data: Vec<i8> = match samples {
            DecodingResult::I8(values) => values,
            DecodingResult::U8(values) => values.into_iter().map(|v| v as i8).collect(),
            // wider integers collapse to a presence flag
            DecodingResult::U16(values) => values.into_iter().map(|v| (v != 0) as i8).collect(),
            DecodingResult::I16(values) => values.into_iter().map(|v| v.signum() as i8).collect(),
            _ => {
                return Err(TerrainError::UnsupportedFormat(
                    "water mask must hold 8 or 16-bit integer samples".to_string(),
                ));
            }
        };

        Raster::new(width, height, data)
    }
}
