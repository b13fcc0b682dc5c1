use crate::foundation::core::{Raster, Rgba8};
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::foundation::math::mul_div255_u8;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over on premultiplied pixels: `out = src + dst * (1 - src.a)`.
///
/// With an opaque `dst` this is the straight-alpha blend
/// `rgb = src.rgb * src.a + dst.rgb * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Blend `src` over `dst` pixel by pixel; both are premultiplied RGBA8 of equal length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PostlineResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PostlineError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Flatten `layer` onto `base`. Both rasters must share the same size.
pub fn composite(base: &mut Raster, layer: &Raster) -> PostlineResult<()> {
    if base.canvas() != layer.canvas() {
        return Err(PostlineError::render(format!(
            "cannot composite {}x{} layer onto {}x{} base",
            layer.width(),
            layer.height(),
            base.width(),
            base.height()
        )));
    }
    over_in_place(base.as_bytes_mut(), layer.as_bytes())
}

/// Flatten a flat full-canvas scrim of `color` onto `base`.
pub fn composite_scrim(base: &mut Raster, color: Rgba8) {
    let src = color.premultiplied();
    if src[3] == 0 {
        return;
    }
    for d in base.as_bytes_mut().chunks_exact_mut(4) {
        let out = over([d[0], d[1], d[2], d[3]], src);
        d.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
