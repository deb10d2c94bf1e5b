//! Tile database types

use crate::terrain_pipeline::coords::TileCoord;
use crate::terrain_pipeline::pack::PackedTile;

/// Magic bytes opening a framed database.
pub const FRAMED_MAGIC: [u8; 4] = *b"CTDB";
/// Current framed layout version.
pub const FRAMED_VERSION: u16 = 1;

/// On-disk layout of a tile database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseLayout {
    /// `[lat, lon, width, height, samples...]` records back to back, no header
    #[default]
    Flat,
    /// Magic, version and entry count header, then length-prefixed records
    Framed,
}

/// One packed tile and its origin
#[derive(Debug, Clone, PartialEq)]
pub struct TileEntry {
    pub coord: TileCoord,
    pub tile: PackedTile,
}

/// Tiles in the order they were discovered
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileDatabase {
    entries: Vec<TileEntry>,
}

impl TileDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TileEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given origin.
    pub fn find(&self, coord: TileCoord) -> Option<&TileEntry> {
        self.entries.iter().find(|e| e.coord == coord)
    }

    /// Packed sample at pixel `(x, y)` of the tile at `coord`.
    pub fn sample(&self, coord: TileCoord, x: usize, y: usize) -> Option<i16> {
        self.find(coord)?.tile.get(x, y)
    }

    /// Total number of 16-bit values in the flat layout.
    pub fn flat_len(&self) -> usize {
        self.entries.iter().map(|e| 4 + e.tile.data.len()).sum()
    }
}

impl FromIterator<TileEntry> for TileDatabase {
    fn from_iter<I: IntoIterator<Item = TileEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for TileDatabase {
    type Item = TileEntry;
    type IntoIter = std::vec::IntoIter<TileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
