use crate::engine::warnings::CompositionWarning;
use crate::foundation::core::{Canvas, Point, Raster};
use crate::foundation::error::PostlineResult;
use crate::layout::{LayoutCx, LayoutKind, LayoutStrategy, PostContent};
use crate::render::composite::composite;
use crate::render::layer::LayerPainter;
use crate::style::config::{GradientStyle, StyleConfig};

/// Photo left undarkened, with a bottom gradient band carrying the headline.
#[derive(Clone, Copy, Debug, Default)]
pub struct GradientOverlay;

/// Opacity of scanline `i` of a band `height` rows tall: `floor((i / height)^gamma * max_alpha)`.
///
/// Non-decreasing in `i` for any positive `gamma`; row 0 is fully transparent.
pub fn gradient_alpha(i: u32, height: u32, gamma: f32, max_alpha: u8) -> u8 {
    if height == 0 {
        return 0;
    }
    let progress = (i.min(height) as f32) / (height as f32);
    let alpha = (progress.powf(gamma) * f32::from(max_alpha)).floor();
    alpha.clamp(0.0, f32::from(max_alpha)) as u8
}

/// Full-canvas layer holding the gradient band along the bottom edge.
///
/// The band height is clamped to the canvas height.
pub fn gradient_band(canvas: Canvas, style: &GradientStyle) -> Raster {
    let mut layer = Raster::transparent(canvas);
    let band = style.height.min(canvas.height);
    let top = canvas.height - band;
    for i in 0..band {
        let alpha = gradient_alpha(i, band, style.gamma, style.color.a);
        if alpha == 0 {
            continue;
        }
        let px = style.color.with_alpha(alpha).premultiplied();
        for dst in layer.row_mut(top + i).chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }
    layer
}

/// Top edge of the first headline line.
pub fn headline_top(style: &StyleConfig) -> f64 {
    let band = style.gradient.height.min(style.canvas.height);
    f64::from(style.canvas.height - band) + f64::from(style.gradient.text_inset)
}

/// Top edge of the brand line.
pub fn brand_top(style: &StyleConfig) -> f64 {
    f64::from(style.canvas.height) - f64::from(style.margin) - f64::from(style.brand_font.size_px)
}

impl LayoutStrategy for GradientOverlay {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Gradient
    }

    fn headline_width(&self, style: &StyleConfig) -> f32 {
        style.canvas.width as f32 - 2.0 * style.margin as f32
    }

    #[tracing::instrument(level = "debug", skip_all, fields(lines = content.headline.len()))]
    fn render(
        &self,
        mut canvas: Raster,
        content: &PostContent<'_>,
        cx: &mut LayoutCx<'_>,
    ) -> PostlineResult<Raster> {
        let style = cx.style;
        let fonts = cx.fonts;
        let size = canvas.canvas();
        let g = &style.gradient;

        if let Some(text) = content.source_text(style) {
            let width = cx.book.measure(&text, &fonts.source);
            let x = f64::from(size.width) - f64::from(g.source_margin) - f64::from(width);
            let layout = cx.book.layout_line(&text, &fonts.source, g.source_color);
            let mut painter = LayerPainter::new(size)?;
            painter.draw_text(&layout, &fonts.source, Point::new(x, f64::from(g.source_margin)));
            composite(&mut canvas, &painter.finish()?)?;
        }

        composite(&mut canvas, &gradient_band(size, g))?;

        let mut painter = LayerPainter::new(size)?;
        let x = f64::from(style.margin);
        let top = headline_top(style);
        let mut y = top;
        for line in content.headline.lines() {
            let layout = cx.book.layout_line(line, &fonts.title, g.text_color);
            painter.draw_text(&layout, &fonts.title, Point::new(x, y));
            y += f64::from(style.line_height);
        }

        let brand = content.brand_text(style);
        if let Some(text) = brand {
            let layout = cx.book.layout_line(text, &fonts.brand, g.brand_color);
            painter.draw_text(&layout, &fonts.brand, Point::new(x, brand_top(style)));
        }
        composite(&mut canvas, &painter.finish()?)?;

        let limit = if brand.is_some() {
            brand_top(style)
        } else {
            f64::from(size.height)
        };
        if !content.headline.is_empty() && y > limit {
            let warning = CompositionWarning::VerticalOverflow {
                layout: LayoutKind::Gradient.as_str(),
                top,
                bottom: y,
                limit,
            };
            tracing::warn!(%warning, "headline runs past the bottom of the gradient");
            cx.warnings.push(warning);
        }

        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/gradient.rs"]
mod tests;
