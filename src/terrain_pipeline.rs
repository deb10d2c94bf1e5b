//! Terrain tile pipeline module
//!
//! Copernicus DEM and water body mask rasters go in; packed tiles, raw grids,
//! signed distance fields and tile databases come out. Submodules cover raster
//! reading, bit packing, distance fields, the tile database format and the
//! orchestration around them.

pub mod common;
pub mod conversions;
pub mod coords;
pub mod database;
pub mod output;
pub mod pack;
pub mod raster;
pub mod sdf;

pub use common::{
    TerrainError,
    Result,
};

pub use raster::{
    ElevationRaster,
    Raster,
    RasterReader,
    TiffRasterReader,
    WaterMaskRaster,
};

pub use pack::{
    OverflowPolicy,
    PackedTile,
    pack_tile,
};

pub use sdf::{
    SignedDistanceField,
    signed_distance_field,
};

pub use coords::{
    RasterKind,
    TileCoord,
    parse_tile_filename,
};

pub use database::{
    DatabaseLayout,
    TileDatabase,
    TileEntry,
};

pub use conversions::{
    ConversionConfig,
    ConversionConfigBuilder,
    TerrainPipeline,
};
