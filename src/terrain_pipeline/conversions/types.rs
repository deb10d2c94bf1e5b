//! Conversion configuration types

use crate::terrain_pipeline::database::DatabaseLayout;
use crate::terrain_pipeline::pack::OverflowPolicy;

/// Configuration for tile conversions
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// How elevations outside the 15-bit range are packed
    pub overflow_policy: OverflowPolicy,
    /// Layout of written tile databases
    pub database_layout: DatabaseLayout,
    /// Whether to reject empty rasters after decoding
    pub validate_dimensions: bool,
    /// Whether a database build skips tiles whose DEM and WBM sizes differ
    /// (false aborts the build instead)
    pub skip_mismatched_tiles: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            overflow_policy: OverflowPolicy::Wrap,
            database_layout: DatabaseLayout::Flat,
            validate_dimensions: true,
            skip_mismatched_tiles: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    overflow_policy: Option<OverflowPolicy>,
    database_layout: Option<DatabaseLayout>,
    validate_dimensions: Option<bool>,
    skip_mismatched_tiles: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.overflow_policy = Some(policy);
        self
    }

    pub fn database_layout(mut self, layout: DatabaseLayout) -> Self {
        self.database_layout = Some(layout);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn skip_mismatched_tiles(mut self, skip: bool) -> Self {
        self.skip_mismatched_tiles = Some(skip);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            overflow_policy: self.overflow_policy.unwrap_or(default.overflow_policy),
            database_layout: self.database_layout.unwrap_or(default.database_layout),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            skip_mismatched_tiles: self.skip_mismatched_tiles.unwrap_or(default.skip_mismatched_tiles),
        }
    }
}
