//! Common utilities module
//!
//! This module contains shared utilities used across the terrain pipeline.

pub mod error;

pub use error::{TerrainError, Result};
