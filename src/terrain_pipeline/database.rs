//! Tile database module
//!
//! Many packed tiles, each tagged with its geographic origin and size,
//! concatenated into one stream of 16-bit samples.

mod discovery;
mod flat_writer;
mod framed_writer;
mod reader;
pub mod types;
mod writer;

pub use discovery::{TileSource, discover_sources};
pub use flat_writer::FlatDatabaseWriter;
pub use framed_writer::FramedDatabaseWriter;
pub use reader::{read_database, read_flat, read_framed};
pub use types::{DatabaseLayout, FRAMED_MAGIC, FRAMED_VERSION, TileDatabase, TileEntry};
pub use writer::{TileDatabaseWriter, encode_record, writer_for};
