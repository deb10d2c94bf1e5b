use tracing::{debug, instrument, warn};

use crate::terrain_pipeline::common::error::{Result, TerrainError};
use crate::terrain_pipeline::raster::{Raster, WaterMaskRaster};
use crate::terrain_pipeline::sdf::edt::distance_transform;

/// Signed distance to the water boundary, divided by the raster height.
/// Positive over water, negative over land.
pub type SignedDistanceField = Raster<f32>;

/// Distance used when a mask has no pixel of the opposite class: the grid diagonal.
pub fn uniform_fallback_distance(width: usize, height: usize) -> f64 {
    let (w, h) = (width as f64, height as f64);
    (w * w + h * h).sqrt()
}

/// Unnormalized signed distance in pixel units: distance to the nearest
/// non-solid pixel minus distance to the nearest solid pixel.
///
/// A pixel is solid when its mask value is strictly positive.
pub fn signed_distance(mask: &WaterMaskRaster) -> Result<Raster<f64>> {
    if mask.is_empty() {
        return Err(TerrainError::InvalidDimensions(mask.width, mask.height));
    }
    let (width, height) = mask.dimensions();

    let solid: Vec<bool> = mask.data.iter().map(|&w| w > 0).collect();
    let land: Vec<bool> = solid.iter().map(|&s| !s).collect();

    let fallback = uniform_fallback_distance(width, height);
    let uniform = || {
        warn!(width, height, fallback, "Uniform water mask, using diagonal as distance");
        vec![fallback; width * height]
    };

    let inside = distance_transform(&land, width, height).unwrap_or_else(&uniform);
    let outside = distance_transform(&solid, width, height).unwrap_or_else(&uniform);

    let data = inside.iter().zip(&outside).map(|(i, o)| i - o).collect();
    Raster::new(width, height, data)
}

/// Normalized signed distance field: [`signed_distance`] divided by the row count.
#[instrument(skip_all, fields(width = mask.width, height = mask.height))]
pub fn signed_distance_field(mask: &WaterMaskRaster) -> Result<SignedDistanceField> {
    let sdf = signed_distance(mask)?;
    let height = sdf.height as f64;
    let field = sdf.map(|d| (d / height) as f32);
    debug!("Signed distance field computed");
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 9x9 land with a 5x5 lake in the middle
    fn lake() -> WaterMaskRaster {
        let mut data = vec![0i8; 81];
        for y in 2..7 {
            for x in 2..7 {
                data[y * 9 + x] = 1;
            }
        }
        Raster::new(9, 9, data).unwrap()
    }

    #[test]
    fn test_sign_convention() {
        let field = signed_distance_field(&lake()).unwrap();
        // lake center is 3 pixels from the nearest land
        assert!(field.get(4, 4).unwrap() > 0.0);
        assert!((field.get(4, 4).unwrap() - 3.0 / 9.0).abs() < 1e-6);
        // corner is land, far from the lake
        assert!(field.get(0, 0).unwrap() < 0.0);
    }

    #[test]
    fn test_boundary_within_one_pixel() {
        let sdf = signed_distance(&lake()).unwrap();
        // solid edge pixel and its land neighbour
        assert_eq!(sdf.get(2, 4).unwrap(), 1.0);
        assert_eq!(sdf.get(1, 4).unwrap(), -1.0);
    }

    #[test]
    fn test_normalized_by_height() {
        let mask = Raster::new(4, 3, vec![0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 1]).unwrap();
        let sdf = signed_distance(&mask).unwrap();
        let field = signed_distance_field(&mask).unwrap();
        for (d, n) in sdf.data.iter().zip(&field.data) {
            assert_eq!(*n, (d / 3.0) as f32);
        }
    }

    #[test]
    fn test_negative_mask_values_are_not_solid() {
        let mask = Raster::from_rows(&[[-1i8, 1]]).unwrap();
        let sdf = signed_distance(&mask).unwrap();
        assert_eq!(sdf.data, vec![-1.0, 1.0]);
    }

    #[test]
    fn test_all_water_uses_diagonal() {
        let mask = Raster::new(3, 4, vec![1i8; 12]).unwrap();
        let field = signed_distance_field(&mask).unwrap();
        let expected = (5.0 / 4.0) as f32;
        assert!(field.data.iter().all(|&v| v == expected));
    }

    #[test]
    fn test_all_land_uses_negative_diagonal() {
        let mask = Raster::new(3, 4, vec![0i8; 12]).unwrap();
        let field = signed_distance_field(&mask).unwrap();
        let expected = (-5.0 / 4.0) as f32;
        assert!(field.data.iter().all(|&v| v == expected));
    }

    #[test]
    fn test_empty_mask() {
        let mask = Raster::new(0, 0, Vec::<i8>::new()).unwrap();
        assert!(matches!(
            signed_distance_field(&mask),
            Err(TerrainError::InvalidDimensions(0, 0))
        ));
    }
}
