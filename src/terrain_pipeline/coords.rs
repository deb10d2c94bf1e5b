//! Copernicus tile filename parsing and naming.
//!
//! Tiles are named like `Copernicus_DSM_COG_30_N44_00_W074_00_DEM.tif`:
//! - `N44`: latitude origin, `S` for the southern hemisphere
//! - `W074`: longitude origin, `E` for the eastern hemisphere
//! - `DEM` / `WBM`: elevation raster or water body mask

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Bucket holding the 30 arc-second (90 m) Copernicus DEM.
pub const COPERNICUS_BUCKET: &str = "copernicus-dem-90m";

const FILENAME_PREFIX: &str = "Copernicus_DSM_COG_30";

/// Integer-degree origin of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub lat: i32,
    pub lon: i32,
}

impl TileCoord {
    pub fn new(lat: i32, lon: i32) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0 { 'E' } else { 'W' };
        write!(f, "{}{:02}{}{:03}", ns, self.lat.unsigned_abs(), ew, self.lon.unsigned_abs())
    }
}

/// Which raster of a tile pair a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterKind {
    /// Digital elevation model
    Dem,
    /// Water body mask
    Wbm,
}

impl RasterKind {
    pub fn marker(self) -> &'static str {
        match self {
            RasterKind::Dem => "DEM",
            RasterKind::Wbm => "WBM",
        }
    }
}

/// Coordinates and raster kind recovered from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileName {
    pub coord: TileCoord,
    pub kind: RasterKind,
}

/// Pattern: `_<N|S><lat:2>_00_<E|W><lon:3>_00_<DEM|WBM>`
///
/// Groups: 1 hemisphere, 2 latitude, 3 hemisphere, 4 longitude, 5 raster kind.
fn tile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"_([NS])(\d{2})_00_([EW])(\d{3})_00_(DEM|WBM)").expect("tile pattern is valid")
    })
}

/// Extracts the tile origin and raster kind from a filename.
///
/// Returns `None` when the name does not follow the Copernicus pattern.
/// Callers treat that as "not a tile", never as an error.
///
/// # Examples
///
/// ```
/// use copdem_pack::terrain_pipeline::coords::{parse_tile_filename, RasterKind};
///
/// let name = parse_tile_filename("Copernicus_DSM_COG_30_N44_00_W074_00_DEM.tif").unwrap();
/// assert_eq!((name.coord.lat, name.coord.lon), (44, -74));
/// assert_eq!(name.kind, RasterKind::Dem);
/// ```
pub fn parse_tile_filename(filename: &str) -> Option<TileName> {
    let captures = tile_pattern().captures(filename)?;

    let lat: i32 = captures[2].parse().ok()?;
    let lon: i32 = captures[4].parse().ok()?;

    let lat = if &captures[1] == "S" { -lat } else { lat };
    let lon = if &captures[3] == "W" { -lon } else { lon };

    let kind = match &captures[5] {
        "DEM" => RasterKind::Dem,
        _ => RasterKind::Wbm,
    };

    Some(TileName {
        coord: TileCoord { lat, lon },
        kind,
    })
}

/// Swaps the raster kind marker in a tile filename, e.g. the DEM name for its WBM.
pub fn companion_filename(filename: &str, kind: RasterKind) -> Option<String> {
    let captures = tile_pattern().captures(filename)?;
    let marker = captures.get(5)?;

    let mut companion = filename.to_string();
    companion.replace_range(marker.range(), kind.marker());
    Some(companion)
}

/// Canonical filename of one raster of a tile.
pub fn tile_filename(coord: TileCoord, kind: RasterKind) -> String {
    let TileCoord { lat, lon } = coord;
    let ns = if lat >= 0 { 'N' } else { 'S' };
    let ew = if lon >= 0 { 'E' } else { 'W' };
    format!(
        "{}_{}{:02}_00_{}{:03}_00_{}.tif",
        FILENAME_PREFIX,
        ns,
        lat.unsigned_abs(),
        ew,
        lon.unsigned_abs(),
        kind.marker()
    )
}

/// Object key inside [`COPERNICUS_BUCKET`]. Water masks live under the DEM's `AUXFILES/`.
pub fn s3_object_key(coord: TileCoord, kind: RasterKind) -> String {
    let dem = tile_filename(coord, RasterKind::Dem);
    let folder = dem.trim_end_matches(".tif");
    match kind {
        RasterKind::Dem => format!("{}/{}", folder, dem),
        RasterKind::Wbm => format!("{}/AUXFILES/{}", folder, tile_filename(coord, kind)),
    }
}

/// All tile origins in the inclusive ranges, latitude-major.
pub fn tile_range(lat_min: i32, lat_max: i32, lon_min: i32, lon_max: i32) -> Vec<TileCoord> {
    (lat_min..=lat_max)
        .flat_map(|lat| (lon_min..=lon_max).map(move |lon| TileCoord { lat, lon }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_north_west() {
        let name = parse_tile_filename("Copernicus_DSM_COG_30_N44_00_W074_00_DEM.tif").unwrap();
        assert_eq!(name.coord, TileCoord::new(44, -74));
        assert_eq!(name.kind, RasterKind::Dem);
    }

    #[test]
    fn test_parse_south_east_wbm() {
        let name = parse_tile_filename("Copernicus_DSM_COG_30_S08_00_E115_00_WBM.tif").unwrap();
        assert_eq!(name.coord, TileCoord::new(-8, 115));
        assert_eq!(name.kind, RasterKind::Wbm);
    }

    #[test]
    fn test_parse_accepts_directory_prefix() {
        let name = parse_tile_filename("data/Copernicus_DSM_COG_30_N00_00_E000_00_DEM.tif").unwrap();
        assert_eq!(name.coord, TileCoord::new(0, 0));
    }

    #[test]
    fn test_parse_no_match() {
        assert_eq!(parse_tile_filename("terrain.raw"), None);
        assert_eq!(parse_tile_filename("Copernicus_DSM_COG_30_N44_00_W74_00_DEM.tif"), None);
        assert_eq!(parse_tile_filename("Copernicus_DSM_COG_30_X44_00_W074_00_DEM.tif"), None);
        assert_eq!(parse_tile_filename("Copernicus_DSM_COG_30_N44_00_W074_00_HEM.tif"), None);
    }

    #[test]
    fn test_tile_filename_round_trip() {
        for coord in [TileCoord::new(44, -74), TileCoord::new(-8, 115), TileCoord::new(0, 0)] {
            for kind in [RasterKind::Dem, RasterKind::Wbm] {
                let name = tile_filename(coord, kind);
                assert_eq!(parse_tile_filename(&name), Some(TileName { coord, kind }));
            }
        }
    }

    #[test]
    fn test_companion_filename() {
        let wbm = companion_filename("x/Copernicus_DSM_COG_30_N44_00_W074_00_DEM.tif", RasterKind::Wbm);
        assert_eq!(wbm.as_deref(), Some("x/Copernicus_DSM_COG_30_N44_00_W074_00_WBM.tif"));
        assert_eq!(companion_filename("readme.txt", RasterKind::Wbm), None);
    }

    #[test]
    fn test_s3_object_key() {
        let coord = TileCoord::new(44, -73);
        assert_eq!(
            s3_object_key(coord, RasterKind::Dem),
            "Copernicus_DSM_COG_30_N44_00_W073_00_DEM/Copernicus_DSM_COG_30_N44_00_W073_00_DEM.tif"
        );
        assert_eq!(
            s3_object_key(coord, RasterKind::Wbm),
            "Copernicus_DSM_COG_30_N44_00_W073_00_DEM/AUXFILES/Copernicus_DSM_COG_30_N44_00_W073_00_WBM.tif"
        );
    }

    #[test]
    fn test_tile_range_lat_major() {
        let coords = tile_range(43, 44, -74, -73);
        assert_eq!(
            coords,
            vec![
                TileCoord::new(43, -74),
                TileCoord::new(43, -73),
                TileCoord::new(44, -74),
                TileCoord::new(44, -73),
            ]
        );
        assert!(tile_range(2, 1, 0, 0).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(TileCoord::new(-8, 115).to_string(), "S08E115");
    }
}
