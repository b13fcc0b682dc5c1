use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::style::config::BackgroundConfig;

/// Candidates tried by [`background_or_default`] before giving up.
pub const MAX_BACKGROUND_CANDIDATES: usize = 5;

/// Decode an encoded background and check it against the minimum size.
pub fn decode_background(
    bytes: &[u8],
    cfg: &BackgroundConfig,
) -> PostlineResult<image::RgbaImage> {
    let img = image::load_from_memory(bytes)
        .context("decode background image")
        .map_err(|e| PostlineError::invalid_image(format!("{e:#}")))?;
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Err(PostlineError::invalid_image("background has a zero dimension"));
    }
    if w < cfg.min_width || h < cfg.min_height {
        return Err(PostlineError::invalid_image(format!(
            "background {w}x{h} is smaller than the {}x{} minimum",
            cfg.min_width, cfg.min_height
        )));
    }
    Ok(img.to_rgba8())
}

/// Flat background of exactly `canvas` size.
pub fn default_background(canvas: Canvas, color: Rgba8) -> image::RgbaImage {
    image::RgbaImage::from_pixel(canvas.width, canvas.height, image::Rgba(color.to_array()))
}

/// First acceptable background among `candidates`, or the flat fallback.
///
/// At most [`MAX_BACKGROUND_CANDIDATES`] candidates are decoded; rejected ones are logged and
/// skipped.
pub fn background_or_default<'b>(
    candidates: impl IntoIterator<Item = &'b [u8]>,
    cfg: &BackgroundConfig,
    canvas: Canvas,
) -> image::RgbaImage {
    for (i, bytes) in candidates
        .into_iter()
        .take(MAX_BACKGROUND_CANDIDATES)
        .enumerate()
    {
        match decode_background(bytes, cfg) {
            Ok(img) => {
                tracing::debug!(
                    candidate = i,
                    width = img.width(),
                    height = img.height(),
                    "background accepted"
                );
                return img;
            }
            Err(err) => tracing::warn!(candidate = i, error = %err, "background rejected"),
        }
    }
    tracing::warn!("no usable background, using flat fallback");
    default_background(canvas, cfg.fallback_color)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/background.rs"]
mod tests;
