use super::*;
use crate::text::font::{FontBook, FontDescriptor, FontRole};

#[test]
fn empty_layer_is_transparent() {
    let layer = LayerPainter::new(Canvas::new(8, 8)).unwrap().finish().unwrap();
    assert!(layer.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn oversized_layer_is_render_error() {
    let err = LayerPainter::new(Canvas::new(70_000, 10)).err().unwrap();
    assert!(matches!(err, PostlineError::Render(_)));
}

#[test]
fn fill_rect_covers_only_its_pixels() {
    let mut p = LayerPainter::new(Canvas::new(16, 16)).unwrap();
    p.fill_rect(Rect::new(4.0, 4.0, 12.0, 12.0), Rgba8::new(255, 0, 0, 255));
    let layer = p.finish().unwrap();

    assert_eq!(layer.pixel(8, 8), Some([255, 0, 0, 255]));
    assert_eq!(layer.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(layer.pixel(14, 8), Some([0, 0, 0, 0]));
}

#[test]
fn translucent_fill_is_premultiplied() {
    let mut p = LayerPainter::new(Canvas::new(8, 8)).unwrap();
    p.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba8::new(255, 255, 255, 128));
    let layer = p.finish().unwrap();
    let px = layer.pixel(4, 4).unwrap();
    assert!(px[3].abs_diff(128) <= 1, "{px:?}");
    assert!(px[0] <= px[3], "{px:?}");
}

#[test]
fn rounded_rect_leaves_corners_clear() {
    let mut p = LayerPainter::new(Canvas::new(64, 64)).unwrap();
    p.fill_rounded_rect(Rect::new(0.0, 0.0, 64.0, 64.0), 20.0, Rgba8::new(0, 0, 255, 255));
    let layer = p.finish().unwrap();

    assert_eq!(layer.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(layer.pixel(63, 63).unwrap()[3], 0);
    assert_eq!(layer.pixel(32, 32), Some([0, 0, 255, 255]));
    assert_eq!(layer.pixel(32, 1).unwrap()[3], 255);
}

#[test]
fn draw_text_marks_pixels_near_origin() {
    let mut book = FontBook::new();
    let font = book
        .load(FontRole::Title, &FontDescriptor::new("", 32.0))
        .unwrap();
    let layout = book.layout_line("Halo", &font, Rgba8::new(255, 255, 255, 255));

    let mut p = LayerPainter::new(Canvas::new(200, 80)).unwrap();
    p.draw_text(&layout, &font, Point::new(20.0, 10.0));
    let layer = p.finish().unwrap();

    let mut inked = 0usize;
    let mut left_of_origin = 0usize;
    for y in 0..80 {
        for x in 0..200 {
            let a = layer.pixel(x, y).unwrap()[3];
            if a > 0 {
                inked += 1;
                if x < 18 {
                    left_of_origin += 1;
                }
            }
        }
    }
    assert!(inked > 50, "only {inked} pixels inked");
    assert_eq!(left_of_origin, 0);
}

#[test]
fn draw_text_spreads_glyphs_across_measured_width_below_origin() {
    let mut book = FontBook::new();
    let font = book
        .load(FontRole::Title, &FontDescriptor::new("", 32.0))
        .unwrap();
    let text = "WWWWWW";
    let width = book.measure(text, &font);
    let layout = book.layout_line(text, &font, Rgba8::new(255, 255, 255, 255));

    let mut p = LayerPainter::new(Canvas::new(400, 80)).unwrap();
    p.draw_text(&layout, &font, Point::new(20.0, 10.0));
    let layer = p.finish().unwrap();

    let mut min_x = u32::MAX;
    let mut max_x = 0u32;
    let mut min_y = u32::MAX;
    for y in 0..80 {
        for x in 0..400 {
            if layer.pixel(x, y).unwrap()[3] > 0 {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
            }
        }
    }
    assert!(min_x != u32::MAX, "no ink");
    let extent = (max_x - min_x + 1) as f32;
    assert!(
        extent >= 0.8 * width,
        "ink spans {extent}px of {width}px measured"
    );
    assert!(min_y >= 10, "ink starts at y={min_y}, above the origin");
}
