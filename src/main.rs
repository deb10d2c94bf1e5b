use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use copdem_pack::logger;
use copdem_pack::terrain_pipeline::coords::{COPERNICUS_BUCKET, RasterKind, s3_object_key, tile_range};
use copdem_pack::terrain_pipeline::{ConversionConfig, DatabaseLayout, OverflowPolicy, TerrainPipeline};

use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Overflow {
    /// Keep the low 16 bits of the shifted elevation (matches existing files)
    Wrap,
    /// Clamp elevations to -16384..=16383 before packing
    Clamp,
    /// Fail on any out-of-range elevation
    Reject,
}

impl From<Overflow> for OverflowPolicy {
    fn from(value: Overflow) -> Self {
        match value {
            Overflow::Wrap => OverflowPolicy::Wrap,
            Overflow::Clamp => OverflowPolicy::Clamp,
            Overflow::Reject => OverflowPolicy::Reject,
        }
    }
}

#[derive(Parser)]
#[command(name = "copdem-pack")]
#[command(about = "Pack Copernicus DEM and water body mask tiles into binary terrain formats", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pack one DEM/WBM pair into a headerless i16 grid
    Pack {
        #[arg(long)]
        dem: PathBuf,
        #[arg(long)]
        wbm: PathBuf,
        #[arg(long, default_value = "terrain.raw")]
        output: PathBuf,
        #[arg(long, value_enum, default_value = "wrap")]
        overflow: Overflow,
    },
    /// Write the elevation grid as f32 meters
    Elevation {
        #[arg(long)]
        dem: PathBuf,
        #[arg(long, default_value = "elevation.raw")]
        output: PathBuf,
    },
    /// Write the water mask's signed distance field as f32, normalized by height
    Sdf {
        #[arg(long)]
        wbm: PathBuf,
        #[arg(long, default_value = "sdf.raw")]
        output: PathBuf,
    },
    /// Pack every tile in a directory into one tile database
    Database {
        /// Directory holding `*_DEM.tif` files and their `*_WBM.tif` masks
        #[arg(long, default_value = "data")]
        dir: PathBuf,
        #[arg(long, default_value = "tiles.db")]
        output: PathBuf,
        /// Write the framed layout (header, entry count, length prefixes)
        #[arg(long)]
        framed: bool,
        #[arg(long, value_enum, default_value = "wrap")]
        overflow: Overflow,
        /// Abort instead of skipping tiles whose DEM and WBM sizes differ
        #[arg(long)]
        strict: bool,
    },
    /// List the entries of a tile database
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the object keys of the DEM and WBM rasters in a degree range
    Plan {
        #[arg(long, allow_hyphen_values = true)]
        lat_min: i32,
        #[arg(long, allow_hyphen_values = true)]
        lat_max: i32,
        #[arg(long, allow_hyphen_values = true)]
        lon_min: i32,
        #[arg(long, allow_hyphen_values = true)]
        lon_max: i32,
    },
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Pack { dem, wbm, output, overflow } => {
            let config = ConversionConfig::builder()
                .overflow_policy(overflow.into())
                .build();
            let stats = TerrainPipeline::new(config)
                .pack_files(&dem, &wbm, &output)
                .with_context(|| format!("packing {}", dem.display()))?;
            info!(
                water = stats.water_samples,
                overflowed = stats.overflowed_samples,
                "Wrote {}",
                output.display()
            );
        }
        Command::Elevation { dem, output } => {
            TerrainPipeline::new(ConversionConfig::default())
                .elevation_file(&dem, &output)
                .with_context(|| format!("converting {}", dem.display()))?;
        }
        Command::Sdf { wbm, output } => {
            TerrainPipeline::new(ConversionConfig::default())
                .sdf_file(&wbm, &output)
                .with_context(|| format!("computing distance field of {}", wbm.display()))?;
        }
        Command::Database { dir, output, framed, overflow, strict } => {
            let layout = if framed { DatabaseLayout::Framed } else { DatabaseLayout::Flat };
            let config = ConversionConfig::builder()
                .overflow_policy(overflow.into())
                .database_layout(layout)
                .skip_mismatched_tiles(!strict)
                .build();
            let database = TerrainPipeline::new(config)
                .database_from_dir(&dir, &output)
                .with_context(|| format!("building tile database from {}", dir.display()))?;
            info!("Wrote {} tiles to {}", database.len(), output.display());
        }
        Command::Inspect { input } => {
            let database = TerrainPipeline::new(ConversionConfig::default())
                .inspect_database(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            for entry in database.entries() {
                println!("{}\t{}x{}", entry.coord, entry.tile.width, entry.tile.height);
            }
            info!("{} entries", database.len());
        }
        Command::Plan { lat_min, lat_max, lon_min, lon_max } => {
            for coord in tile_range(lat_min, lat_max, lon_min, lon_max) {
                for kind in [RasterKind::Dem, RasterKind::Wbm] {
                    println!("s3://{}/{}", COPERNICUS_BUCKET, s3_object_key(coord, kind));
                }
            }
        }
    }
    Ok(())
}

fn main() {
    logger::init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
