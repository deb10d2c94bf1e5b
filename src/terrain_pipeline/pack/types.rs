//! Packing types

use crate::terrain_pipeline::raster::Raster;

/// 16-bit grid of `(elevation << 1) | water_flag` samples
pub type PackedTile = Raster<i16>;

/// Largest elevation that survives the shift unchanged
pub const MAX_PACKED_ELEVATION: i16 = i16::MAX >> 1;
/// Smallest elevation that survives the shift unchanged
pub const MIN_PACKED_ELEVATION: i16 = i16::MIN >> 1;

/// What to do with elevations outside `MIN_PACKED_ELEVATION..=MAX_PACKED_ELEVATION`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Shift the two's-complement bit pattern and let the top bit fall off.
    /// Bit-exact with existing packed files.
    #[default]
    Wrap,
    /// Clamp the elevation into range before shifting
    Clamp,
    /// Fail the tile
    Reject,
}

/// Counters collected while packing one tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackStats {
    /// Samples with the water flag set
    pub water_samples: usize,
    /// Samples whose elevation was out of range
    pub overflowed_samples: usize,
}
