use std::io::{BufWriter, Write};
use tracing::debug;

use crate::terrain_pipeline::common::error::Result;
use crate::terrain_pipeline::database::types::TileDatabase;
use crate::terrain_pipeline::database::writer::{TileDatabaseWriter, encode_record, write_i16s};

/// Writes the headerless layout. A reader finds entry boundaries only by
/// decoding each record's width and height.
pub struct FlatDatabaseWriter;

impl TileDatabaseWriter for FlatDatabaseWriter {
    fn write_database(&self, database: &TileDatabase, output: &mut dyn Write) -> Result<()> {
        debug!("Writing flat tile database with {} entries", database.len());

        let mut writer = BufWriter::new(output);
        for entry in database.entries() {
            let record = encode_record(entry)?;
            write_i16s(&record, &mut writer)?;
        }
        writer.flush()?;

        debug!("Flat tile database complete: {} samples", database.flat_len());
        Ok(())
    }
}
