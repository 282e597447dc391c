//! Grayscale preview images of the grid layers.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use super::ExportError;
use crate::terrain::TerrainGrid;

/// A grid layer rendered as one 8-bit image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Serialized material codes.
    Material,
    Top,
    Fraction,
    Bottom,
}

impl Layer {
    pub fn all() -> [Layer; 4] {
        [Layer::Material, Layer::Top, Layer::Fraction, Layer::Bottom]
    }

    /// File stem of the layer image.
    pub fn stem(&self) -> &'static str {
        match self {
            Layer::Material => "mat",
            Layer::Top => "top",
            Layer::Fraction => "fra",
            Layer::Bottom => "bot",
        }
    }

    /// Raw bytes of the layer in row-major order.
    pub fn bytes(&self, grid: &TerrainGrid) -> Vec<u8> {
        match self {
            Layer::Material => grid.material_bytes(),
            Layer::Top => grid.top.clone(),
            Layer::Fraction => grid.fraction.clone(),
            Layer::Bottom => grid.bottom.clone(),
        }
    }
}

/// Image container for the preview rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RasterFormat {
    /// Binary portable graymap (P5).
    #[default]
    Pgm,
    Png,
}

impl RasterFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            RasterFormat::Pgm => "pgm",
            RasterFormat::Png => "png",
        }
    }
}

/// Writes one layer of the grid as an 8-bit grayscale image.
pub fn write_layer(
    grid: &TerrainGrid,
    layer: Layer,
    format: RasterFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let size = grid.size as u32;
    let data = layer.bytes(grid);
    let writer = BufWriter::new(File::create(path)?);

    match format {
        RasterFormat::Pgm => {
            let encoder = PnmEncoder::new(writer)
                .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
            encoder.write_image(&data, size, size, ExtendedColorType::L8)?;
        }
        RasterFormat::Png => {
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
            encoder.write_image(&data, size, size, ExtendedColorType::L8)?;
        }
    }

    Ok(())
}

/// Writes all four layers into `dir` and returns the written paths.
pub fn write_rasters(
    grid: &TerrainGrid,
    dir: &Path,
    format: RasterFormat,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut paths = Vec::with_capacity(4);
    for layer in Layer::all() {
        let path = dir.join(format!("{}.{}", layer.stem(), format.extension()));
        write_layer(grid, layer, format, &path)?;
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Material;
    use tempfile::tempdir;

    fn sample_grid() -> TerrainGrid {
        let mut grid = TerrainGrid::with_size(32);
        for y in 8..24 {
            for x in 8..24 {
                grid.set_column(x, y, Material::Grass, 100 + x as u8, (x % 4) as u8, 90);
            }
        }
        grid.set_column(8, 8, Material::Dirt, 99, 0, 90);
        grid
    }

    #[test]
    fn test_layer_stems() {
        let stems: Vec<&str> = Layer::all().iter().map(|l| l.stem()).collect();
        assert_eq!(stems, vec!["mat", "top", "fra", "bot"]);
    }

    #[test]
    fn test_pgm_layout() {
        let grid = sample_grid();
        let dir = tempdir().unwrap();
        let path = dir.path().join("mat.pgm");
        write_layer(&grid, Layer::Material, RasterFormat::Pgm, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P5"));
        let pixels = &bytes[bytes.len() - 32 * 32..];
        assert_eq!(pixels, grid.material_bytes().as_slice());
        assert_eq!(pixels[8 * 32 + 8], 4);
        assert_eq!(pixels[8 * 32 + 9], 2);
        assert_eq!(pixels[0], 0);
    }

    #[test]
    fn test_png_decodes_to_layer() {
        let grid = sample_grid();
        let dir = tempdir().unwrap();
        let path = dir.path().join("top.png");
        write_layer(&grid, Layer::Top, RasterFormat::Png, &path).unwrap();

        let img = image::open(&path).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (32, 32));
        assert_eq!(img.as_raw(), &grid.top);
    }

    #[test]
    fn test_write_rasters() {
        let grid = sample_grid();
        let dir = tempdir().unwrap();
        let paths = write_rasters(&grid, dir.path(), RasterFormat::Pgm).unwrap();

        assert_eq!(paths.len(), 4);
        for name in ["mat.pgm", "top.pgm", "fra.pgm", "bot.pgm"] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }

        let bot = image::open(dir.path().join("bot.pgm")).unwrap().to_luma8();
        assert_eq!(bot.as_raw(), &grid.bottom);
    }
}
