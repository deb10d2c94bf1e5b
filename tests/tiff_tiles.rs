use std::fs::File;
use std::path::Path;

use copdem_pack::terrain_pipeline::coords::tile_filename;
use copdem_pack::terrain_pipeline::database::read_flat;
use copdem_pack::terrain_pipeline::{
    ConversionConfig, RasterKind, TerrainError, TerrainPipeline, TileCoord,
};
use tiff::encoder::{TiffEncoder, colortype};

fn write_dem(path: &Path, width: u32, height: u32, samples: &[f32]) {
    let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    encoder
        .write_image::<colortype::Gray32Float>(width, height, samples)
        .unwrap();
}

fn write_wbm(path: &Path, width: u32, height: u32, samples: &[u8]) {
    let mut encoder = TiffEncoder::new(File::create(path).unwrap()).unwrap();
    encoder
        .write_image::<colortype::Gray8>(width, height, samples)
        .unwrap();
}

fn read_i16(path: &Path) -> Vec<i16> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(2)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect()
}

fn read_f32(path: &Path) -> Vec<f32> {
    std::fs::read(path)
        .unwrap()
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[test]
fn pack_single_tile_from_tiff() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join(tile_filename(TileCoord::new(44, -74), RasterKind::Dem));
    let wbm = dir.path().join(tile_filename(TileCoord::new(44, -74), RasterKind::Wbm));
    let output = dir.path().join("terrain.raw");

    write_dem(&dem, 2, 1, &[100.0, -50.0]);
    write_wbm(&wbm, 2, 1, &[0, 3]);

    let pipeline = TerrainPipeline::new(ConversionConfig::default());
    let stats = pipeline.pack_files(&dem, &wbm, &output).unwrap();

    assert_eq!(stats.water_samples, 1);
    assert_eq!(read_i16(&output), vec![200, -99]);
}

#[test]
fn pack_shape_mismatch_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let wbm = dir.path().join("wbm.tif");
    let output = dir.path().join("terrain.raw");

    write_dem(&dem, 2, 2, &[1.0; 4]);
    write_wbm(&wbm, 4, 1, &[0; 4]);

    let pipeline = TerrainPipeline::new(ConversionConfig::default());
    let result = pipeline.pack_files(&dem, &wbm, &output);

    assert!(matches!(result, Err(TerrainError::ShapeMismatch(2, 2, 4, 1))));
    assert!(!output.exists());
}

#[test]
fn elevation_and_sdf_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.tif");
    let wbm = dir.path().join("wbm.tif");

    write_dem(&dem, 3, 1, &[1.5, 2.0, -7.9]);
    // water in the middle column of a 3x3 mask
    write_wbm(&wbm, 3, 3, &[0, 1, 0, 0, 1, 0, 0, 1, 0]);

    let pipeline = TerrainPipeline::new(ConversionConfig::default());

    let elevation_out = dir.path().join("elevation.raw");
    pipeline.elevation_file(&dem, &elevation_out).unwrap();
    assert_eq!(read_f32(&elevation_out), vec![1.0, 2.0, -7.0]);

    let sdf_out = dir.path().join("sdf.raw");
    pipeline.sdf_file(&wbm, &sdf_out).unwrap();
    let field = read_f32(&sdf_out);
    assert_eq!(field.len(), 9);
    let third = (1.0f64 / 3.0) as f32;
    for row in field.chunks_exact(3) {
        assert_eq!(row, &[-third, third, -third]);
    }
}

#[test]
fn database_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    let tiles = [
        (TileCoord::new(44, -74), 3u32, 2u32),
        (TileCoord::new(-12, 131), 2, 4),
    ];
    for (coord, width, height) in tiles {
        let n = (width * height) as usize;
        let dem: Vec<f32> = (0..n).map(|i| (i as f32) * 10.0 + coord.lat as f32).collect();
        let wbm: Vec<u8> = (0..n).map(|i| (i % 2) as u8).collect();
        write_dem(&dir.path().join(tile_filename(coord, RasterKind::Dem)), width, height, &dem);
        write_wbm(&dir.path().join(tile_filename(coord, RasterKind::Wbm)), width, height, &wbm);
    }
    std::fs::write(dir.path().join("download.log"), "not a tile").unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("tiles.db");

    let pipeline = TerrainPipeline::new(ConversionConfig::default());
    let database = pipeline.database_from_dir(dir.path(), &output).unwrap();
    assert_eq!(database.len(), 2);

    // directory order is up to the filesystem; check content per origin
    let decoded = read_flat(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(decoded, database);

    let north = decoded.find(TileCoord::new(44, -74)).unwrap();
    assert_eq!(north.tile.dimensions(), (3, 2));
    assert_eq!(&north.tile.data[..3], &[88, 109, 128]);

    let south = decoded.find(TileCoord::new(-12, 131)).unwrap();
    assert_eq!(south.tile.dimensions(), (2, 4));
    assert_eq!(south.tile.data[0], -24);
}

#[test]
fn missing_raster_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = TerrainPipeline::new(ConversionConfig::default());
    let result = pipeline.sdf_file(dir.path().join("absent.tif"), dir.path().join("sdf.raw"));
    assert!(matches!(result, Err(TerrainError::FileNotFound(_))));
}
