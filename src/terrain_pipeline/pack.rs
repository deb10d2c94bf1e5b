//! Elevation and water mask bit packing
//!
//! Each packed sample keeps the elevation in the upper 15 bits and the water
//! flag in bit 0: `(elevation << 1) | water`.

mod packer;
pub mod types;

pub use packer::{pack_sample, pack_tile, unpack_sample, unpack_tile};
pub use types::{OverflowPolicy, PackStats, PackedTile, MAX_PACKED_ELEVATION, MIN_PACKED_ELEVATION};
