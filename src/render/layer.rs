use kurbo::Shape;

use crate::foundation::core::{Canvas, Point, Raster, Rect, Rgba8};
use crate::foundation::error::{PostlineError, PostlineResult};
use crate::text::font::LoadedFont;

/// Rasterizes shapes and text into a transparent canvas-sized layer with `vello_cpu`.
///
/// Draw calls composite over each other in call order; [`LayerPainter::finish`] yields the
/// layer as a premultiplied [`Raster`] for [`crate::render::composite::composite`].
pub struct LayerPainter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl LayerPainter {
    /// Start an empty layer the size of `canvas`.
    pub fn new(canvas: Canvas) -> PostlineResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PostlineError::render("layer width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PostlineError::render("layer height exceeds u16"))?;
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        Ok(Self { ctx, width, height })
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    /// Fill a rectangle with circular corners of `radius`.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f64, color: Rgba8) {
        let rr = kurbo::RoundedRect::from_rect(rect, radius.max(0.0));
        let mut path = vello_cpu::kurbo::BezPath::new();
        for el in rr.path_elements(0.1) {
            path.push(el);
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&path);
    }

    /// Draw a shaped text layout with its top-left corner at `origin`.
    ///
    /// Glyph colors come from the layout's brush.
    pub fn draw_text(&mut self, layout: &parley::Layout<Rgba8>, font: &LoadedFont, origin: Point) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(to_cpu_color(brush));
                // Layout-space positions: advances accumulated along x, baseline in y.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(font.font_data())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Rasterize every queued draw into a premultiplied layer.
    pub fn finish(mut self) -> PostlineResult<Raster> {
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        Raster::from_premul(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/layer.rs"]
mod tests;
