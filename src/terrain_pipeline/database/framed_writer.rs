use std::io::{BufWriter, Write};
use tracing::debug;

use crate::terrain_pipeline::common::error::{Result, TerrainError};
use crate::terrain_pipeline::database::types::{FRAMED_MAGIC, FRAMED_VERSION, TileDatabase};
use crate::terrain_pipeline::database::writer::{TileDatabaseWriter, encode_record, write_i16s};

/// Writes the framed layout:
///
/// ```text
/// "CTDB" | version: u16 | entry count: u32
/// record length in samples: u32 | lat | lon | width | height | samples...
/// ...
/// ```
pub struct FramedDatabaseWriter;

impl TileDatabaseWriter for FramedDatabaseWriter {
    fn write_database(&self, database: &TileDatabase, output: &mut dyn Write) -> Result<()> {
        debug!("Writing framed tile database with {} entries", database.len());

        let count = u32::try_from(database.len()).map_err(|_| TerrainError::FieldOverflow {
            field: "entry count",
            value: database.len() as i64,
        })?;

        let mut writer = BufWriter::new(output);
        writer.write_all(&FRAMED_MAGIC)?;
        writer.write_all(&FRAMED_VERSION.to_le_bytes())?;
        writer.write_all(&count.to_le_bytes())?;

        for entry in database.entries() {
            let record = encode_record(entry)?;
            let length = u32::try_from(record.len()).map_err(|_| TerrainError::FieldOverflow {
                field: "record length",
                value: record.len() as i64,
            })?;
            writer.write_all(&length.to_le_bytes())?;
            write_i16s(&record, &mut writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}
