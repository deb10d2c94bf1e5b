//! Headerless raw grid encoders.
//!
//! Samples are written row-major in little-endian byte order. Nothing
//! describes the grid shape; consumers know width and height out of band.

use std::io::{BufWriter, Write};

use tracing::debug;

use crate::terrain_pipeline::common::error::Result;
use crate::terrain_pipeline::raster::{ElevationRaster, Raster};

/// Writes a 16-bit grid such as a packed tile.
pub fn write_i16_raw(raster: &Raster<i16>, output: &mut dyn Write) -> Result<()> {
    debug!("Writing {}x{} i16 raw grid", raster.width, raster.height);
    write_samples(raster.data.iter().map(|v| v.to_le_bytes()), output)
}

/// Writes a 32-bit float grid such as elevations or a signed distance field.
pub fn write_f32_raw(raster: &Raster<f32>, output: &mut dyn Write) -> Result<()> {
    debug!("Writing {}x{} f32 raw grid", raster.width, raster.height);
    write_samples(raster.data.iter().map(|v| v.to_le_bytes()), output)
}

fn write_samples<const N: usize>(
    samples: impl Iterator<Item = [u8; N]>,
    output: &mut dyn Write,
) -> Result<()> {
    let mut writer = BufWriter::new(output);
    for bytes in samples {
        writer.write_all(&bytes)?;
    }
    writer.flush()?;
    Ok(())
}

/// Elevation-only output: meters as 32-bit floats.
pub fn elevation_to_f32(elevation: &ElevationRaster) -> Raster<f32> {
    elevation.map(f32::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i16_little_endian_row_major() {
        let raster = Raster::from_rows(&[[200i16, -99], [1, 256]]).unwrap();
        let mut out = Vec::new();
        write_i16_raw(&raster, &mut out).unwrap();
        assert_eq!(out, vec![200, 0, 0x9d, 0xff, 1, 0, 0, 1]);
    }

    #[test]
    fn test_elevation_as_f32() {
        let elevation = Raster::from_rows(&[[100i16, -50]]).unwrap();
        let mut out = Vec::new();
        write_f32_raw(&elevation_to_f32(&elevation), &mut out).unwrap();

        let decoded: Vec<f32> = out
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(decoded, vec![100.0, -50.0]);
    }
}
