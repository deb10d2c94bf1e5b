//! Signed distance field encoding of the water body mask

mod edt;
mod encoder;

pub use edt::distance_transform;
pub use encoder::{SignedDistanceField, signed_distance, signed_distance_field, uniform_fallback_distance};
