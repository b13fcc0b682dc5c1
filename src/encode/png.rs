use std::path::Path;

use anyhow::Context as _;
use image::ImageEncoder as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::core::Raster;
use crate::foundation::error::{PostlineError, PostlineResult};

/// PNG compression level for a 0..=100 quality setting.
///
/// PNG is lossless, so quality only trades encode time for file size.
pub fn compression_for_quality(quality: u8) -> CompressionType {
    match quality {
        0..34 => CompressionType::Fast,
        34..67 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encode `raster` as an opaque RGB8 PNG.
pub fn encode_png(raster: &Raster, quality: u8) -> PostlineResult<Vec<u8>> {
    let rgb = raster.to_rgb_image();
    let mut out = Vec::new();
    PngEncoder::new_with_quality(
        &mut out,
        compression_for_quality(quality),
        FilterType::Adaptive,
    )
    .write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| PostlineError::render(format!("png encode failed: {e}")))?;
    Ok(out)
}

/// Encode `raster` and write it to `path`, creating missing parent directories.
#[tracing::instrument(level = "debug", skip(raster), fields(path = %path.display()))]
pub fn write_png(raster: &Raster, path: &Path, quality: u8) -> PostlineResult<()> {
    let bytes = encode_png(raster, quality)?;
    ensure_parent_dir(path)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::debug!(bytes = bytes.len(), "png written");
    Ok(())
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> PostlineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// File name derived from a headline: `post_{slug}.png`.
///
/// Punctuation is dropped, the text is cut to 50 characters, and runs of whitespace and
/// hyphens become a single `-`.
pub fn default_output_name(headline: &str) -> String {
    let kept: String = headline
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .take(50)
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_separator = false;
    for c in kept.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else {
            slug.push(c);
            in_separator = false;
        }
    }
    format!("post_{slug}.png")
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
