use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{info, instrument, warn};

use crate::terrain_pipeline::{
    common::error::{Result, TerrainError},
    conversions::{timing::PipelineTimings, types::ConversionConfig},
    database::{TileDatabase, TileEntry, discover_sources, read_database, writer_for},
    output::{elevation_to_f32, write_f32_raw, write_i16_raw},
    pack::{PackStats, PackedTile, pack_tile},
    raster::{ElevationRaster, RasterReader, TiffRasterReader, WaterMaskRaster},
    sdf::signed_distance_field,
};

pub struct TerrainPipeline<R: RasterReader> {
    reader: R,
    config: ConversionConfig,
}

impl TerrainPipeline<TiffRasterReader> {
    pub fn new(config: ConversionConfig) -> Self {
        Self {
            reader: TiffRasterReader,
            config,
        }
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TerrainError::FileNotFound(path.display().to_string()),
        _ => TerrainError::UnreadableRaster(format!("{}: {}", path.display(), e)),
    })
}

fn create_output(path: &Path) -> Result<File> {
    File::create(path)
        .map_err(|e| TerrainError::OutputWriteError(format!("{}: {}", path.display(), e)))
}

impl<R: RasterReader> TerrainPipeline<R> {
    pub fn with_custom(reader: R, config: ConversionConfig) -> Self {
        Self { reader, config }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    fn decode_elevation(&self, data: &[u8]) -> Result<ElevationRaster> {
        let raster = self.reader.read_elevation(data)?;
        self.validate_dimensions(raster.width, raster.height)?;
        Ok(raster)
    }

    fn decode_water_mask(&self, data: &[u8]) -> Result<WaterMaskRaster> {
        let raster = self.reader.read_water_mask(data)?;
        self.validate_dimensions(raster.width, raster.height)?;
        Ok(raster)
    }

    /// Decodes and packs a DEM/WBM pair held in memory.
    pub fn decode_and_pack(&self, dem_data: &[u8], wbm_data: &[u8]) -> Result<(PackedTile, PackStats)> {
        let elevation = self.decode_elevation(dem_data)?;
        let water = self.decode_water_mask(wbm_data)?;
        pack_tile(&elevation, &water, self.config.overflow_policy)
    }

    /// Packs a DEM/WBM pair and writes the headerless i16 grid.
    /// Nothing is written when packing fails.
    #[instrument(skip(self, dem_data, wbm_data, output), fields(dem_size = dem_data.len()))]
    pub fn pack(&self, dem_data: &[u8], wbm_data: &[u8], output: &mut dyn Write) -> Result<PackStats> {
        let (tile, stats) = self.decode_and_pack(dem_data, wbm_data)?;
        write_i16_raw(&tile, output)?;

        info!(
            width = tile.width,
            height = tile.height,
            water = stats.water_samples,
            "Packed tile written"
        );
        Ok(stats)
    }

    #[instrument(skip(self, dem_path, wbm_path, output_path))]
    pub fn pack_files<P: AsRef<Path>, Q: AsRef<Path>, O: AsRef<Path>>(
        &self,
        dem_path: P,
        wbm_path: Q,
        output_path: O,
    ) -> Result<PackStats> {
        let (dem_path, wbm_path, output_path) =
            (dem_path.as_ref(), wbm_path.as_ref(), output_path.as_ref());

        info!(
            dem = %dem_path.display(),
            wbm = %wbm_path.display(),
            output = %output_path.display(),
            "Packing tile"
        );

        let mut timings = PipelineTimings::new();
        let dem_data = timings.time("read_dem", || read_input(dem_path))?;
        let wbm_data = timings.time("read_wbm", || read_input(wbm_path))?;
        let (tile, stats) = timings.time("pack", || self.decode_and_pack(&dem_data, &wbm_data))?;

        // created only after packing succeeded
        let mut output = create_output(output_path)?;
        timings.time("write", || write_i16_raw(&tile, &mut output))?;
        timings.log_summary();

        info!(width = tile.width, height = tile.height, "Packed tile written");
        Ok(stats)
    }

    /// Writes the elevation grid as f32 meters.
    #[instrument(skip(self, dem_data, output), fields(dem_size = dem_data.len()))]
    pub fn elevation(&self, dem_data: &[u8], output: &mut dyn Write) -> Result<()> {
        let elevation = self.decode_elevation(dem_data)?;
        write_f32_raw(&elevation_to_f32(&elevation), output)?;
        info!(width = elevation.width, height = elevation.height, "Elevation grid written");
        Ok(())
    }

    pub fn elevation_file<P: AsRef<Path>, O: AsRef<Path>>(&self, dem_path: P, output_path: O) -> Result<()> {
        let dem_data = read_input(dem_path.as_ref())?;
        let mut output = create_output(output_path.as_ref())?;
        self.elevation(&dem_data, &mut output)
    }

    /// Writes the normalized signed distance field of a water mask as f32.
    #[instrument(skip(self, wbm_data, output), fields(wbm_size = wbm_data.len()))]
    pub fn sdf(&self, wbm_data: &[u8], output: &mut dyn Write) -> Result<()> {
        let mask = self.decode_water_mask(wbm_data)?;
        let field = signed_distance_field(&mask)?;
        write_f32_raw(&field, output)?;
        info!(width = field.width, height = field.height, "Signed distance field written");
        Ok(())
    }

    pub fn sdf_file<P: AsRef<Path>, O: AsRef<Path>>(&self, wbm_path: P, output_path: O) -> Result<()> {
        let wbm_data = read_input(wbm_path.as_ref())?;
        let field = {
            let _span = tracing::info_span!("signed_distance_field").entered();
            signed_distance_field(&self.decode_water_mask(&wbm_data)?)?
        };
        let mut output = create_output(output_path.as_ref())?;
        write_f32_raw(&field, &mut output)?;
        info!(width = field.width, height = field.height, "Signed distance field written");
        Ok(())
    }

    /// Folds discovered filenames into a tile database.
    ///
    /// Names without a DEM tile pattern are skipped. A tile whose rasters differ
    /// in size is skipped with a warning unless `skip_mismatched_tiles` is off.
    /// Missing or unreadable rasters abort the build.
    #[instrument(skip(self, dir, filenames), fields(dir = %dir.display()))]
    pub fn build_database<I, S>(&self, dir: &Path, filenames: I) -> Result<TileDatabase>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0usize;

        let database = discover_sources(filenames).try_fold(TileDatabase::new(), |mut database, source| {
            let dem_data = read_input(&dir.join(&source.dem))?;
            let wbm_data = read_input(&dir.join(&source.wbm))?;

            match self.decode_and_pack(&dem_data, &wbm_data) {
                Ok((tile, _)) => database.push(TileEntry { coord: source.coord, tile }),
                Err(TerrainError::ShapeMismatch(ew, eh, ww, wh)) if self.config.skip_mismatched_tiles => {
                    warn!(
                        tile = %source.coord,
                        "Skipping tile: elevation is {}x{}, water mask is {}x{}",
                        ew, eh, ww, wh
                    );
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
            Ok(database)
        })?;

        info!(entries = database.len(), skipped, "Tile database assembled");
        Ok(database)
    }

    /// Writes a database in the configured layout.
    pub fn write_database(&self, database: &TileDatabase, output: &mut dyn Write) -> Result<()> {
        writer_for(self.config.database_layout).write_database(database, output)
    }

    /// Scans `dir`, builds the tile database in discovery order and writes it.
    #[instrument(skip(self, dir, output_path))]
    pub fn database_from_dir<P: AsRef<Path>, O: AsRef<Path>>(
        &self,
        dir: P,
        output_path: O,
    ) -> Result<TileDatabase> {
        let (dir, output_path) = (dir.as_ref(), output_path.as_ref());
        let mut timings = PipelineTimings::new();

        let filenames = timings.time("scan", || scan_directory(dir))?;
        let database = timings.time("build", || self.build_database(dir, &filenames))?;

        let mut output = create_output(output_path)?;
        timings.time("write", || self.write_database(&database, &mut output))?;
        timings.log_summary();

        info!(
            output = %output_path.display(),
            entries = database.len(),
            layout = ?self.config.database_layout,
            "Tile database written"
        );
        Ok(database)
    }

    pub fn inspect_database<P: AsRef<Path>>(&self, path: P) -> Result<TileDatabase> {
        let data = read_input(path.as_ref())?;
        read_database(&data)
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

/// Filenames in `dir`, in the order the filesystem yields them.
fn scan_directory(dir: &Path) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TerrainError::FileNotFound(dir.display().to_string()),
        _ => TerrainError::IoError(e),
    })?;

    let mut filenames = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            filenames.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(filenames)
}
