use crate::engine::warnings::CompositionWarning;
use crate::foundation::core::{Point, Raster, Rect};
use crate::foundation::error::PostlineResult;
use crate::layout::{LayoutCx, LayoutKind, LayoutStrategy, PostContent};
use crate::render::composite::{composite, composite_scrim};
use crate::render::layer::LayerPainter;
use crate::style::config::StyleConfig;

/// Darkened photo with a rounded panel near the bottom holding the headline and attribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxAttribution;

/// What an attribution slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributionKind {
    /// `"{label}: {source}"`.
    Source,
    /// Brand text.
    Brand,
}

/// Measured attribution text waiting for a slot.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributionText {
    /// Source or brand.
    pub kind: AttributionKind,
    /// Text as drawn.
    pub text: String,
    /// Rendered width in pixels.
    pub width: f32,
}

/// Attribution text with its resolved left edge.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    /// Source or brand.
    pub kind: AttributionKind,
    /// Text as drawn.
    pub text: String,
    /// Left edge in canvas pixels.
    pub x: f64,
}

/// The attribution row: up to one left-aligned and one right-aligned entry sharing `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributionRow {
    /// Top of the row in canvas pixels.
    pub y: f64,
    /// Entry aligned to the inner left edge of the panel.
    pub left: Option<PlacedText>,
    /// Entry aligned to the inner right edge of the panel.
    pub right: Option<PlacedText>,
}

impl AttributionRow {
    /// `true` when nothing is drawn in the row.
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Panel rectangle for a headline of `line_count` lines.
///
/// The panel spans the canvas width minus margins and grows upward from a fixed bottom edge,
/// so its top goes negative when the headline has too many lines.
pub fn box_rect(style: &StyleConfig, line_count: usize) -> Rect {
    let margin = f64::from(style.margin);
    let padding = f64::from(style.padding);
    let width = f64::from(style.canvas.width) - 2.0 * margin;
    let text_height = line_count as f64 * f64::from(style.line_height);
    let height = text_height + 2.0 * padding + f64::from(style.attribution_reserve);
    let top = f64::from(style.canvas.height) - height - margin - f64::from(style.bottom_offset);
    Rect::new(margin, top, margin + width, top + height)
}

/// Bottom edge of the headline text block inside `panel`.
pub fn headline_bottom(panel: Rect, style: &StyleConfig, line_count: usize) -> f64 {
    panel.y0 + f64::from(style.padding) + line_count as f64 * f64::from(style.line_height)
}

/// Assign source and brand to the row slots.
///
/// The source always takes the right slot; the brand goes left beside it, or right when there
/// is no source.
pub fn place_attribution(
    panel: Rect,
    style: &StyleConfig,
    source: Option<AttributionText>,
    brand: Option<AttributionText>,
) -> AttributionRow {
    let padding = f64::from(style.padding);
    let y = panel.y1 - padding - f64::from(style.attribution_row_offset);
    let right_aligned = |t: AttributionText| PlacedText {
        x: panel.x1 - padding - f64::from(t.width),
        kind: t.kind,
        text: t.text,
    };
    let left_aligned = |t: AttributionText| PlacedText {
        x: panel.x0 + padding,
        kind: t.kind,
        text: t.text,
    };

    match (source, brand) {
        (Some(s), b) => AttributionRow {
            y,
            left: b.map(left_aligned),
            right: Some(right_aligned(s)),
        },
        (None, Some(b)) => AttributionRow {
            y,
            left: None,
            right: Some(right_aligned(b)),
        },
        (None, None) => AttributionRow {
            y,
            left: None,
            right: None,
        },
    }
}

impl LayoutStrategy for BoxAttribution {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Box
    }

    fn headline_width(&self, style: &StyleConfig) -> f32 {
        style.box_text_width()
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
        let panel = box_rect(style, content.headline.len());
        tracing::debug!(?panel, "box panel");

        if panel.y0 < 0.0 {
            let warning = CompositionWarning::VerticalOverflow {
                layout: LayoutKind::Box.as_str(),
                top: panel.y0,
                bottom: headline_bottom(panel, style, content.headline.len()),
                limit: f64::from(style.canvas.height),
            };
            tracing::warn!(%warning, "headline panel extends above the canvas");
            cx.warnings.push(warning);
        }

        composite_scrim(&mut canvas, style.overlay_color);

        let mut painter = LayerPainter::new(canvas.canvas())?;
        painter.fill_rounded_rect(panel, f64::from(style.corner_radius), style.box_fill);

        let x = panel.x0 + f64::from(style.padding);
        let mut y = panel.y0 + f64::from(style.padding);
        for line in content.headline.lines() {
            let layout = cx.book.layout_line(line, &fonts.title, style.text_color);
            painter.draw_text(&layout, &fonts.title, Point::new(x, y));
            y += f64::from(style.line_height);
        }

        let source = content.source_text(style).map(|text| AttributionText {
            kind: AttributionKind::Source,
            width: cx.book.measure(&text, &fonts.source),
            text,
        });
        let brand = content.brand_text(style).map(|text| AttributionText {
            kind: AttributionKind::Brand,
            width: cx.book.measure(text, &fonts.brand),
            text: text.to_string(),
        });
        let row = place_attribution(panel, style, source, brand);
        for placed in row.left.iter().chain(row.right.iter()) {
            let (font, color) = match placed.kind {
                AttributionKind::Source => (&fonts.source, style.source_color),
                AttributionKind::Brand => (&fonts.brand, style.brand_color),
            };
            let layout = cx.book.layout_line(&placed.text, font, color);
            painter.draw_text(&layout, font, Point::new(placed.x, row.y));
        }

        composite(&mut canvas, &painter.finish()?)?;
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/boxed.rs"]
mod tests;
