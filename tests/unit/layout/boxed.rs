use super::*;
use crate::foundation::core::{Canvas, Rgba8};
use crate::layout::LayoutFonts;
use crate::text::font::{FontBook, FontDescriptor};
use crate::text::metrics::{FixedAdvance, TextMeasure};
use crate::text::wrap::{WrappedText, wrap};

fn measured(kind: AttributionKind, text: &str) -> AttributionText {
    AttributionText {
        kind,
        text: text.to_string(),
        width: FixedAdvance { advance_px: 10.0 }.measure(text),
    }
}

fn wide_style() -> StyleConfig {
    // 1080 - 2 * 40 = 1000px panel.
    StyleConfig::default()
}

#[test]
fn panel_geometry_follows_line_count() {
    let style = wide_style();
    let panel = box_rect(&style, 3);
    assert_eq!(panel.width(), 1000.0);
    assert_eq!(panel.height(), 3.0 * 60.0 + 2.0 * 30.0 + 80.0);
    assert_eq!(panel.y0, 1350.0 - 320.0 - 40.0 - 60.0);
    assert_eq!(panel.x0, 40.0);
    assert_eq!(panel.y1, 1250.0);
}

#[test]
fn panel_stays_on_canvas_within_headroom() {
    let style = wide_style();
    // (1350 - 40 - 60 - 60 - 80) / 60 = 18.5 lines fit above the bottom offset.
    for lines in 0..=18 {
        let panel = box_rect(&style, lines);
        assert!(panel.y0 >= 0.0, "{lines} lines -> top {}", panel.y0);
        assert!(panel.y1 <= 1350.0);
    }
    assert!(box_rect(&style, 19).y0 < 0.0);
}

#[test]
fn source_only_is_right_aligned() {
    let style = wide_style();
    let panel = box_rect(&style, 2);
    let row = place_attribution(
        panel,
        &style,
        Some(measured(AttributionKind::Source, "Sumber: Kompas")),
        None,
    );
    assert!(row.left.is_none());
    let right = row.right.unwrap();
    assert_eq!(right.text, "Sumber: Kompas");
    assert_eq!(right.x, 1040.0 - 30.0 - 140.0);
    assert_eq!(row.y, panel.y1 - 30.0 - 30.0);
}

#[test]
fn source_and_brand_share_the_row() {
    let style = wide_style();
    let panel = box_rect(&style, 2);
    let row = place_attribution(
        panel,
        &style,
        Some(measured(AttributionKind::Source, "Sumber: Kompas")),
        Some(measured(AttributionKind::Brand, "MyBrand")),
    );
    let left = row.left.unwrap();
    let right = row.right.unwrap();
    assert_eq!(left.kind, AttributionKind::Brand);
    assert_eq!(left.x, 40.0 + 30.0);
    assert_eq!(right.kind, AttributionKind::Source);
    assert_eq!(right.x, 1040.0 - 30.0 - 140.0);
}

#[test]
fn brand_takes_the_right_slot_without_source() {
    let style = wide_style();
    let panel = box_rect(&style, 1);
    let row = place_attribution(
        panel,
        &style,
        None,
        Some(measured(AttributionKind::Brand, "MyBrand")),
    );
    assert!(row.left.is_none());
    let right = row.right.unwrap();
    assert_eq!(right.kind, AttributionKind::Brand);
    assert_eq!(right.x, 1040.0 - 30.0 - 70.0);

    let row = place_attribution(panel, &style, None, None);
    assert!(row.is_empty());
}

#[test]
fn hidden_source_resolves_to_brand_only() {
    let style = StyleConfig {
        show_source: false,
        ..wide_style()
    };
    let headline = WrappedText::default();
    let content = PostContent {
        headline: &headline,
        source: Some("Kompas"),
        brand: Some("MyBrand"),
    };
    assert_eq!(content.source_text(&style), None);
    assert_eq!(content.brand_text(&style), Some("MyBrand"));
}

fn small_style() -> StyleConfig {
    StyleConfig {
        canvas: Canvas::new(400, 500),
        margin: 20,
        padding: 20,
        line_height: 40,
        title_font: FontDescriptor::new("", 28.0),
        source_font: FontDescriptor::new("", 16.0),
        brand_font: FontDescriptor::new("", 16.0),
        ..StyleConfig::default()
    }
}

fn render_small(
    style: &StyleConfig,
    headline: &str,
    source: Option<&str>,
) -> (Raster, Vec<CompositionWarning>, Rect) {
    let mut book = FontBook::new();
    let mut warnings = Vec::new();
    let fonts = LayoutFonts::load(&mut book, style, &mut warnings).unwrap();
    let wrapped = wrap(
        headline,
        &mut FixedAdvance { advance_px: 16.0 },
        BoxAttribution.headline_width(style),
    );
    let panel = box_rect(style, wrapped.len());
    let content = PostContent {
        headline: &wrapped,
        source,
        brand: None,
    };
    let mut cx = LayoutCx {
        style,
        fonts: &fonts,
        book: &mut book,
        warnings: &mut warnings,
    };
    let base = Raster::solid(style.canvas, Rgba8::new(128, 128, 128, 255));
    let out = BoxAttribution.render(base, &content, &mut cx).unwrap();
    (out, warnings, panel)
}

#[test]
fn render_darkens_photo_and_fills_panel() {
    let style = small_style();
    let (out, warnings, panel) = render_small(&style, "Halo dunia", Some("Kompas"));
    assert_eq!(out.canvas(), style.canvas);
    assert!(
        warnings
            .iter()
            .all(|w| matches!(w, CompositionWarning::FontFallback { .. }))
    );

    // 128 under a 100-alpha black scrim.
    assert_eq!(out.pixel(5, 5), Some([78, 78, 78, 255]));
    // 240-alpha white panel over the scrimmed photo.
    let inside = out
        .pixel((panel.x1 - 30.0) as u32, (panel.y0 + 8.0) as u32)
        .unwrap();
    assert!(inside[..3].iter().all(|c| c.abs_diff(245) <= 1), "{inside:?}");
    assert_eq!(inside[3], 255);

    // Headline glyphs are dark ink inside the panel's text area.
    let text_top = (panel.y0 + 20.0) as u32;
    let dark = (text_top..text_top + 40)
        .flat_map(|y| (40..200).map(move |x| (x, y)))
        .filter(|&(x, y)| out.pixel(x, y).unwrap()[0] < 100)
        .count();
    assert!(dark > 30, "expected headline ink, found {dark} dark pixels");
}

#[test]
fn tall_headline_reports_vertical_overflow() {
    let style = small_style();
    let headline = (0..40).map(|_| "kata").collect::<Vec<_>>().join(" ");
    let (out, warnings, panel) = render_small(&style, &headline, None);
    assert!(panel.y0 < 0.0);
    assert_eq!(out.canvas(), style.canvas);
    let reported = warnings
        .iter()
        .find_map(|w| match w {
            CompositionWarning::VerticalOverflow {
                layout: "box",
                top,
                bottom,
                ..
            } if *top < 0.0 => Some((*top, *bottom)),
            _ => None,
        })
        .unwrap();
    assert_eq!(reported.0, panel.y0);
    // Text bottom sits above the attribution reserve, not on the panel edge.
    assert_eq!(reported.1, panel.y1 - 20.0 - 80.0);
}

#[test]
fn headline_bottom_excludes_padding_and_attribution_reserve() {
    let style = wide_style();
    let panel = box_rect(&style, 3);
    assert_eq!(headline_bottom(panel, &style, 3), 930.0 + 30.0 + 180.0);
    assert_eq!(headline_bottom(panel, &style, 3), panel.y1 - 30.0 - 80.0);
}
