use crate::constants::{IMAGE_EXTENSIONS, JPEG_QUALITY};
use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Dimensions of one image before and after resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeOutcome {
    pub original: (u32, u32),
    pub resized: (u32, u32),
}

impl ResizeOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.original == self.resized
    }
}

pub fn is_image_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

/// Recursively lists the image assets under `root`, ordered by file name.
pub fn scan_images(root: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_image_asset(entry.path()) {
            images.push(entry.into_path());
        }
    }
    Ok(images)
}

/// `floor(width * ratio)` by `floor(height * ratio)`, never below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, ratio: f64) -> (u32, u32) {
    let scale = |side: u32| ((side as f64 * ratio).floor() as u32).max(1);
    (scale(width), scale(height))
}

pub fn resize_image(img: &mut DynamicImage, ratio: f64) {
    let (width, height) = scaled_dimensions(img.width(), img.height(), ratio);
    if (width, height) != img.dimensions() {
        *img = img.resize_exact(width, height, FilterType::Lanczos3);
    }
}

fn save_jpeg(img: &DynamicImage, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);

    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img.write_with_encoder(encoder)?,
        _ => DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?,
    }

    writer.flush()?;
    Ok(())
}

/// Decodes the image at `path`, shrinks it by `ratio` and writes it back in
/// the format its extension names. The file is left untouched when the
/// dimensions would not change.
pub fn resize_image_file(path: &Path, ratio: f64) -> Result<ResizeOutcome> {
    let format = ImageFormat::from_path(path)?;
    let mut img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let original = img.dimensions();

    resize_image(&mut img, ratio);
    let outcome = ResizeOutcome {
        original,
        resized: img.dimensions(),
    };
    if outcome.is_unchanged() {
        return Ok(outcome);
    }

    match format {
        ImageFormat::Jpeg => save_jpeg(&img, path)?,
        other => img.save_with_format(path, other)?,
    }

    Ok(outcome)
}
