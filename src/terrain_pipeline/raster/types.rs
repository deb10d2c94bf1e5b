//! Raster grid types

use crate::terrain_pipeline::common::error::{Result, TerrainError};

/// A row-major 2D grid of samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster<T> {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Samples, `width * height` of them, row by row
    pub data: Vec<T>,
}

/// Elevation in meters (Copernicus DEM)
pub type ElevationRaster = Raster<i16>;

/// Water body mask: 0 is land, anything else is water (Copernicus WBM)
pub type WaterMaskRaster = Raster<i8>;

impl<T: Copy> Raster<T> {
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        match width.checked_mul(height) {
            Some(len) if len == data.len() => Ok(Self { width, height, data }),
            _ => Err(TerrainError::InvalidDimensions(width, height)),
        }
    }

    /// Builds a raster from nested rows. All rows must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.len() != width {
                return Err(TerrainError::InvalidDimensions(row.len(), height));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { width, height, data })
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.width.max(1)).take(self.height)
    }

    pub fn map<U, F: FnMut(T) -> U>(&self, f: F) -> Raster<U> {
        Raster {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = Raster::new(3, 2, vec![0i16; 5]);
        assert!(matches!(result, Err(TerrainError::InvalidDimensions(3, 2))));
    }

    #[test]
    fn test_from_rows_row_major() {
        let raster = Raster::from_rows(&[[1i16, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(raster.dimensions(), (3, 2));
        assert_eq!(raster.data, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(raster.get(2, 1), Some(6));
        assert_eq!(raster.get(3, 0), None);
    }

    #[test]
    fn test_from_rows_ragged() {
        let rows: Vec<Vec<i8>> = vec![vec![0, 1], vec![1]];
        assert!(Raster::from_rows(&rows).is_err());
    }

    #[test]
    fn test_rows_iterates_each_row() {
        let raster = Raster::from_rows(&[[1i8, 2], [3, 4], [5, 6]]).unwrap();
        let rows: Vec<&[i8]> = raster.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
    }
}
