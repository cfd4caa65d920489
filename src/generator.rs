use crate::icon_set::{self, IconSpec};
use anyhow::{Context, Result};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageReader, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Failures that stop a run before any icon is written
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("source image not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("failed to read source image {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode source image {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create output directory {}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resizes the normalized source to one icon and writes it to `path`
pub trait IconWriter {
    fn write_icon(&self, source: &RgbaImage, icon: &IconSpec, path: &Path) -> Result<()>;
}

/// Lanczos3 resize, PNG with best compression
#[derive(Debug, Default, Clone, Copy)]
pub struct PngIconWriter;

impl IconWriter for PngIconWriter {
    fn write_icon(&self, source: &RgbaImage, icon: &IconSpec, path: &Path) -> Result<()> {
        let resized = resize_square(source, icon.pixels);
        save_png(&resized, path)
    }
}

pub fn resize_square(source: &RgbaImage, pixels: u32) -> RgbaImage {
    if source.width() == pixels && source.height() == pixels {
        return source.clone();
    }
    imageops::resize(source, pixels, pixels, FilterType::Lanczos3)
}

pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, PngFilter::Adaptive);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .with_context(|| format!("Failed to encode {}", path.display()))?;

    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ProducedIcon {
    pub name: String,
    pub file_name: String,
    pub pixels: u32,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct FailedIcon {
    pub name: String,
    pub pixels: u32,
    pub error: anyhow::Error,
}

/// Outcome of one pass over the icon table, both lists in table order
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub source_size: (u32, u32),
    pub cropped: bool,
    pub produced: Vec<ProducedIcon>,
    pub failed: Vec<FailedIcon>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// File names (`<name>.png`) of every icon that was written
    pub fn produced_file_names(&self) -> Vec<String> {
        self.produced
            .iter()
            .map(|icon| icon.file_name.clone())
            .collect()
    }
}

/// Source image after square crop and RGBA conversion
#[derive(Debug, Clone)]
pub struct NormalizedSource {
    pub image: RgbaImage,
    pub original_size: (u32, u32),
    pub cropped: bool,
}

pub fn load_source(path: &Path) -> Result<DynamicImage, GenerateError> {
    if !path.exists() {
        return Err(GenerateError::SourceMissing(path.to_path_buf()));
    }

    // Format comes from the file's magic bytes, not its extension
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| GenerateError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    reader.decode().map_err(|source| GenerateError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Crops to the top-left `min(w, h)` square (not centered) and converts to RGBA8
pub fn normalize_source(image: DynamicImage) -> NormalizedSource {
    let (width, height) = (image.width(), image.height());

    if width == height {
        return NormalizedSource {
            image: image.into_rgba8(),
            original_size: (width, height),
            cropped: false,
        };
    }

    let side = width.min(height);
    log::info!(
        "Source image is {}x{}, not square; cropping to top-left {}x{}",
        width,
        height,
        side,
        side
    );

    NormalizedSource {
        image: image.crop_imm(0, 0, side, side).into_rgba8(),
        original_size: (width, height),
        cropped: true,
    }
}

/// Writes one PNG per icon into `output_dir` using the default writer
pub fn generate_icons(
    source: &Path,
    output_dir: &Path,
    icons: &[IconSpec],
) -> Result<GenerationReport, GenerateError> {
    generate_icons_with(source, output_dir, icons, &PngIconWriter)
}

pub fn generate_icons_with<W: IconWriter + ?Sized>(
    source: &Path,
    output_dir: &Path,
    icons: &[IconSpec],
    writer: &W,
) -> Result<GenerationReport, GenerateError> {
    // Decode before touching the output directory so a bad source leaves nothing behind
    let decoded = load_source(source)?;
    log::info!(
        "Loaded source image {} ({}x{})",
        source.display(),
        decoded.width(),
        decoded.height()
    );

    let normalized = normalize_source(decoded);

    fs::create_dir_all(output_dir).map_err(|source| GenerateError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    Ok(write_icon_table(&normalized, output_dir, icons, writer))
}

/// Iterates the table; a failing entry is logged and skipped, never aborts the loop
pub fn write_icon_table<W: IconWriter + ?Sized>(
    source: &NormalizedSource,
    output_dir: &Path,
    icons: &[IconSpec],
    writer: &W,
) -> GenerationReport {
    if let Some(largest) = icon_set::largest_icon(icons) {
        if source.image.width() < largest {
            log::warn!(
                "Source is {}px but the largest icon is {}px; it will be upscaled",
                source.image.width(),
                largest
            );
        }
    }

    let mut report = GenerationReport {
        source_size: source.original_size,
        cropped: source.cropped,
        ..Default::default()
    };

    for icon in icons {
        let path = output_dir.join(icon.file_name());

        match writer.write_icon(&source.image, icon, &path) {
            Ok(()) => {
                log::debug!("Wrote {} ({}x{})", path.display(), icon.pixels, icon.pixels);
                report.produced.push(ProducedIcon {
                    name: icon.name.clone(),
                    file_name: icon.file_name(),
                    pixels: icon.pixels,
                    path,
                });
            }
            Err(error) => {
                log::error!("Failed to generate {}: {:#}", icon.file_name(), error);
                report.failed.push(FailedIcon {
                    name: icon.name.clone(),
                    pixels: icon.pixels,
                    error,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn quadrants(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            match (x < width / 2, y < height / 2) {
                (true, true) => Rgba([255, 0, 0, 255]),
                (false, true) => Rgba([0, 255, 0, 255]),
                (true, false) => Rgba([0, 0, 255, 255]),
                (false, false) => Rgba([0, 0, 0, 0]),
            }
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn wide_source_is_cropped_from_the_origin() {
        let normalized = normalize_source(quadrants(40, 20));

        assert!(normalized.cropped);
        assert_eq!(normalized.original_size, (40, 20));
        assert_eq!(normalized.image.dimensions(), (20, 20));
        // A centered crop would start at x=10 and pick up green at (10, 0)
        assert_eq!(*normalized.image.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*normalized.image.get_pixel(19, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*normalized.image.get_pixel(0, 19), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn tall_source_is_cropped_from_the_origin() {
        let normalized = normalize_source(quadrants(10, 30));

        assert_eq!(normalized.image.dimensions(), (10, 10));
        assert_eq!(*normalized.image.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*normalized.image.get_pixel(9, 9), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn rgb_source_is_converted_to_rgba() {
        let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3])));
        let normalized = normalize_source(rgb);

        assert!(!normalized.cropped);
        assert_eq!(*normalized.image.get_pixel(3, 3), Rgba([1, 2, 3, 255]));
    }

    #[test]
    fn resize_square_hits_exact_dimensions() {
        let img = quadrants(64, 64).into_rgba8();
        assert_eq!(resize_square(&img, 29).dimensions(), (29, 29));
        assert_eq!(resize_square(&img, 64).dimensions(), (64, 64));
        assert_eq!(resize_square(&img, 167).dimensions(), (167, 167));
    }
}
