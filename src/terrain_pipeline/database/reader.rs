//! Tile database decoding.
//!
//! A flat database cannot start with the framed magic: `"CT"` read as a
//! little-endian `i16` latitude is 21571, far outside any valid origin.

use tracing::debug;

use crate::terrain_pipeline::common::error::{Result, TerrainError};
use crate::terrain_pipeline::coords::TileCoord;
use crate::terrain_pipeline::database::types::{FRAMED_MAGIC, FRAMED_VERSION, TileDatabase, TileEntry};
use crate::terrain_pipeline::raster::Raster;

const FRAMED_HEADER_LEN: usize = 4 + 2 + 4;

fn malformed(message: impl Into<String>) -> TerrainError {
    TerrainError::MalformedDatabase(message.into())
}

fn to_i16s(bytes: &[u8]) -> Result<Vec<i16>> {
    if bytes.len() % 2 != 0 {
        return Err(malformed(format!("odd byte count {}", bytes.len())));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect())
}

fn read_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let chunk = bytes.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Decodes one record starting at `values[pos]`, returning it and the
/// position just past it.
fn decode_record(values: &[i16], pos: usize) -> Result<(TileEntry, usize)> {
    let header = values
        .get(pos..pos + 4)
        .ok_or_else(|| malformed(format!("truncated record header at sample {}", pos)))?;
    let (lat, lon, width, height) = (header[0], header[1], header[2], header[3]);

    if width <= 0 || height <= 0 {
        return Err(malformed(format!(
            "invalid tile size {}x{} at sample {}",
            width, height, pos
        )));
    }

    let (width, height) = (width as usize, height as usize);
    let start = pos + 4;
    let end = start + width * height;
    let samples = values.get(start..end).ok_or_else(|| {
        malformed(format!(
            "tile at sample {} needs {} samples, {} remain",
            pos,
            width * height,
            values.len() - start
        ))
    })?;

    let entry = TileEntry {
        coord: TileCoord::new(i32::from(lat), i32::from(lon)),
        tile: Raster::new(width, height, samples.to_vec())?,
    };
    Ok((entry, end))
}

/// Decodes the headerless layout, walking records by their width and height.
pub fn read_flat(bytes: &[u8]) -> Result<TileDatabase> {
    let values = to_i16s(bytes)?;
    let mut database = TileDatabase::new();
    let mut pos = 0;

    while pos < values.len() {
        let (entry, next) = decode_record(&values, pos)?;
        database.push(entry);
        pos = next;
    }

    debug!("Decoded flat tile database: {} entries", database.len());
    Ok(database)
}

/// Decodes the framed layout, checking the header and every length prefix.
pub fn read_framed(bytes: &[u8]) -> Result<TileDatabase> {
    if bytes.len() < FRAMED_HEADER_LEN || bytes[..4] != FRAMED_MAGIC {
        return Err(malformed("missing framed database header"));
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != FRAMED_VERSION {
        return Err(malformed(format!("unsupported version {}", version)));
    }

    let count = read_u32(bytes, 6).ok_or_else(|| malformed("truncated header"))? as usize;

    let mut database = TileDatabase::new();
    let mut offset = FRAMED_HEADER_LEN;

    for index in 0..count {
        let length = read_u32(bytes, offset)
            .ok_or_else(|| malformed(format!("truncated length prefix of entry {}", index)))?
            as usize;
        offset += 4;

        let record_bytes = bytes
            .get(offset..offset + length * 2)
            .ok_or_else(|| malformed(format!("entry {} shorter than its length prefix", index)))?;
        let values = to_i16s(record_bytes)?;

        let (entry, end) = decode_record(&values, 0)?;
        if end != values.len() {
            return Err(malformed(format!(
                "entry {} length prefix {} disagrees with its {}x{} tile",
                index, length, entry.tile.width, entry.tile.height
            )));
        }

        database.push(entry);
        offset += length * 2;
    }

    if offset != bytes.len() {
        return Err(malformed(format!(
            "{} trailing bytes after {} entries",
            bytes.len() - offset,
            count
        )));
    }

    debug!("Decoded framed tile database: {} entries", database.len());
    Ok(database)
}

/// Decodes either layout, choosing by the leading magic bytes.
pub fn read_database(bytes: &[u8]) -> Result<TileDatabase> {
    if bytes.starts_with(&FRAMED_MAGIC) {
        read_framed(bytes)
    } else {
        read_flat(bytes)
    }
}
