//! Mapping discovered filenames to tile sources.
//!
//! Every DEM filename with a parsable origin becomes a source paired with its
//! water mask. Anything else is skipped without an error.

use tracing::debug;

use crate::terrain_pipeline::coords::{RasterKind, TileCoord, companion_filename, parse_tile_filename};

/// The two raster files of one tile, as names relative to the scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    pub coord: TileCoord,
    pub dem: String,
    pub wbm: String,
}

impl TileSource {
    fn from_filename(filename: &str) -> Option<Self> {
        let name = parse_tile_filename(filename)?;
        if name.kind != RasterKind::Dem {
            return None;
        }
        Some(Self {
            coord: name.coord,
            dem: filename.to_string(),
            wbm: companion_filename(filename, RasterKind::Wbm)?,
        })
    }
}

/// Filters discovered filenames down to tile sources, keeping discovery order.
pub fn discover_sources<I, S>(filenames: I) -> impl Iterator<Item = TileSource>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    filenames.into_iter().filter_map(|filename| {
        let filename = filename.as_ref();
        let source = TileSource::from_filename(filename);
        if source.is_none() {
            debug!(filename, "Skipping file without a DEM tile name");
        }
        source
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_unparsable_and_masks() {
        let names = [
            "Copernicus_DSM_COG_30_N44_00_W074_00_DEM.tif",
            "notes.txt",
            "Copernicus_DSM_COG_30_N44_00_W074_00_WBM.tif",
            "Copernicus_DSM_COG_30_S01_00_E010_00_DEM.tif",
            "Copernicus_DSM_COG_30_N4_00_W074_00_DEM.tif",
        ];
        let sources: Vec<TileSource> = discover_sources(names).collect();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].coord, TileCoord::new(44, -74));
        assert_eq!(sources[0].wbm, "Copernicus_DSM_COG_30_N44_00_W074_00_WBM.tif");
        assert_eq!(sources[1].coord, TileCoord::new(-1, 10));
    }

    #[test]
    fn test_keeps_discovery_order() {
        let names = vec![
            "Copernicus_DSM_COG_30_N50_00_W080_00_DEM.tif".to_string(),
            "Copernicus_DSM_COG_30_N40_00_W070_00_DEM.tif".to_string(),
        ];
        let coords: Vec<TileCoord> = discover_sources(names).map(|s| s.coord).collect();
        assert_eq!(coords, vec![TileCoord::new(50, -80), TileCoord::new(40, -70)]);
    }
}
