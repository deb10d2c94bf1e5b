use std::io::Write;

use crate::terrain_pipeline::common::error::{Result, TerrainError};
use crate::terrain_pipeline::database::flat_writer::FlatDatabaseWriter;
use crate::terrain_pipeline::database::framed_writer::FramedDatabaseWriter;
use crate::terrain_pipeline::database::types::{DatabaseLayout, TileDatabase, TileEntry};

pub trait TileDatabaseWriter {
    fn write_database(&self, database: &TileDatabase, output: &mut dyn Write) -> Result<()>;
}

pub fn writer_for(layout: DatabaseLayout) -> Box<dyn TileDatabaseWriter> {
    match layout {
        DatabaseLayout::Flat => Box::new(FlatDatabaseWriter),
        DatabaseLayout::Framed => Box::new(FramedDatabaseWriter),
    }
}

fn field(name: &'static str, value: i64) -> Result<i16> {
    i16::try_from(value).map_err(|_| TerrainError::FieldOverflow { field: name, value })
}

/// Encodes one `[lat, lon, width, height, samples...]` record.
pub fn encode_record(entry: &TileEntry) -> Result<Vec<i16>> {
    let tile = &entry.tile;
    if tile.is_empty() {
        return Err(TerrainError::InvalidDimensions(tile.width, tile.height));
    }

    let mut record = Vec::with_capacity(4 + tile.data.len());
    record.push(field("latitude", i64::from(entry.coord.lat))?);
    record.push(field("longitude", i64::from(entry.coord.lon))?);
    record.push(field("width", tile.width as i64)?);
    record.push(field("height", tile.height as i64)?);
    record.extend_from_slice(&tile.data);
    Ok(record)
}

pub(super) fn write_i16s(values: &[i16], output: &mut dyn Write) -> Result<()> {
    for value in values {
        output.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}
