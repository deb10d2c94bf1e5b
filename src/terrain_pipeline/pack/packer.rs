use tracing::{debug, instrument, warn};

use crate::terrain_pipeline::common::error::{Result, TerrainError};
use crate::terrain_pipeline::pack::types::{
    MAX_PACKED_ELEVATION, MIN_PACKED_ELEVATION, OverflowPolicy, PackStats, PackedTile,
};
use crate::terrain_pipeline::raster::{ElevationRaster, Raster, WaterMaskRaster};

/// Packs one sample. Out-of-range elevations wrap.
#[inline]
pub fn pack_sample(elevation: i16, water: i8) -> i16 {
    elevation.wrapping_shl(1) | i16::from(water != 0)
}

/// Splits a packed sample back into `(elevation, water_flag)`.
#[inline]
pub fn unpack_sample(packed: i16) -> (i16, i16) {
    // arithmetic shift keeps the sign
    (packed >> 1, packed & 1)
}

#[inline]
fn in_range(elevation: i16) -> bool {
    (MIN_PACKED_ELEVATION..=MAX_PACKED_ELEVATION).contains(&elevation)
}

/// Combines an elevation raster and a water mask of the same shape into a packed tile.
#[instrument(skip_all, fields(width = elevation.width, height = elevation.height))]
pub fn pack_tile(
    elevation: &ElevationRaster,
    water: &WaterMaskRaster,
    policy: OverflowPolicy,
) -> Result<(PackedTile, PackStats)> {
    if elevation.dimensions() != water.dimensions() {
        return Err(TerrainError::ShapeMismatch(
            elevation.width,
            elevation.height,
            water.width,
            water.height,
        ));
    }

    let mut stats = PackStats::default();
    let mut first_overflow = None;

    for &e in elevation.data.iter().filter(|&&e| !in_range(e)) {
        stats.overflowed_samples += 1;
        first_overflow.get_or_insert(e);
    }

    if let Some(first) = first_overflow {
        match policy {
            OverflowPolicy::Reject => {
                return Err(TerrainError::PackOverflow {
                    count: stats.overflowed_samples,
                    first,
                });
            }
            OverflowPolicy::Wrap => warn!(
                count = stats.overflowed_samples,
                first, "Elevations out of packable range, wrapping"
            ),
            OverflowPolicy::Clamp => warn!(
                count = stats.overflowed_samples,
                first, "Elevations out of packable range, clamping"
            ),
        }
    }

    let data: Vec<i16> = elevation
        .data
        .iter()
        .zip(&water.data)
        .map(|(&e, &w)| {
            let e = match policy {
                OverflowPolicy::Clamp => e.clamp(MIN_PACKED_ELEVATION, MAX_PACKED_ELEVATION),
                _ => e,
            };
            if w != 0 {
                stats.water_samples += 1;
            }
            pack_sample(e, w)
        })
        .collect();

    debug!(water = stats.water_samples, "Packed tile");

    Ok((
        Raster {
            width: elevation.width,
            height: elevation.height,
            data,
        },
        stats,
    ))
}

/// Inverse of [`pack_tile`] for in-range elevations. The water mask comes back as 0/1.
pub fn unpack_tile(packed: &PackedTile) -> (ElevationRaster, WaterMaskRaster) {
    let elevation = packed.map(|p| unpack_sample(p).0);
    let water = packed.map(|p| unpack_sample(p).1 as i8);
    (elevation, water)
}
