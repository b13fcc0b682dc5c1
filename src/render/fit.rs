use image::imageops::{self, FilterType};

use crate::foundation::core::{Canvas, Raster};
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::foundation::math::{clamp_premultiplied_in_place, premultiply_rgba8_in_place};

/// Scaled size that covers `canvas` while keeping the source aspect ratio.
///
/// The side that matches the canvas is exact; the other side is at least the canvas size.
pub fn cover_dimensions(src_w: u32, src_h: u32, canvas: Canvas) -> PostlineResult<(u32, u32)> {
    if src_w == 0 || src_h == 0 {
        return Err(PostlineError::invalid_image(format!(
            "background has zero dimension ({src_w}x{src_h})"
        )));
    }
    if canvas.is_empty() {
        return Err(PostlineError::configuration(format!(
            "canvas has zero dimension ({}x{})",
            canvas.width, canvas.height
        )));
    }

    let src_ratio = f64::from(src_w) / f64::from(src_h);
    let target_ratio = f64::from(canvas.width) / f64::from(canvas.height);

    let (w, h) = if src_ratio > target_ratio {
        let w = (f64::from(canvas.height) * src_ratio).floor() as u32;
        (w.max(canvas.width), canvas.height)
    } else {
        let h = (f64::from(canvas.width) / src_ratio).floor() as u32;
        (canvas.width, h.max(canvas.height))
    };
    Ok((w, h))
}

/// Resize `src` to cover `canvas` (Lanczos3) and center-crop to exactly the canvas size.
#[tracing::instrument(skip(src), fields(src_w = src.width(), src_h = src.height()))]
pub fn fit_cover(src: &image::RgbaImage, canvas: Canvas) -> PostlineResult<Raster> {
    let (src_w, src_h) = src.dimensions();
    let (scaled_w, scaled_h) = cover_dimensions(src_w, src_h, canvas)?;

    // Resample in premultiplied space so transparent edges do not bleed color.
    let mut premul = src.clone();
    premultiply_rgba8_in_place(&mut premul);

    let scaled = if (scaled_w, scaled_h) == (src_w, src_h) {
        premul
    } else {
        imageops::resize(&premul, scaled_w, scaled_h, FilterType::Lanczos3)
    };

    let left = (scaled_w - canvas.width) / 2;
    let top = (scaled_h - canvas.height) / 2;
    tracing::debug!(scaled_w, scaled_h, left, top, "cover fit");

    let cropped = imageops::crop_imm(&scaled, left, top, canvas.width, canvas.height).to_image();
    let mut data = cropped.into_raw();
    clamp_premultiplied_in_place(&mut data);
    Raster::from_premul(canvas.width, canvas.height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
