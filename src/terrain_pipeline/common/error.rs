use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to decode raster: {0}")]
    UnreadableRaster(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    #[error("Shape mismatch: elevation is {0}x{1}, water mask is {2}x{3}")]
    ShapeMismatch(usize, usize, usize, usize),

    #[error("Invalid raster dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("{count} elevation samples outside -16384..=16383 (first: {first})")]
    PackOverflow { count: usize, first: i16 },

    #[error("Value {value} of field `{field}` does not fit in a 16-bit record")]
    FieldOverflow { field: &'static str, value: i64 },

    #[error("Malformed tile database: {0}")]
    MalformedDatabase(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
