use super::*;
use crate::foundation::core::Canvas;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_matches_straight_alpha_formula_on_opaque_base() {
    // Black at alpha 100 over white: 255 * (1 - 100/255) = 155.
    let out = over([255, 255, 255, 255], Rgba8::new(0, 0, 0, 100).premultiplied());
    assert_eq!(out, [155, 155, 155, 255]);

    // White at alpha 240 over mid gray: 240 + 128 * 15 / 255 = 247.5 -> 248.
    let out = over([128, 128, 128, 255], Rgba8::new(255, 255, 255, 240).premultiplied());
    assert_eq!(out, [248, 248, 248, 255]);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_in_place(&mut dst[..6], &[0u8; 6]).is_err());
}

#[test]
fn composite_requires_equal_sizes() {
    let mut base = Raster::solid(Canvas::new(4, 4), Rgba8::new(0, 0, 0, 255));
    let layer = Raster::transparent(Canvas::new(4, 3));
    let err = composite(&mut base, &layer).unwrap_err();
    assert!(err.to_string().contains("cannot composite"));
}

#[test]
fn composite_transparent_layer_keeps_base() {
    let mut base = Raster::solid(Canvas::new(4, 4), Rgba8::new(9, 8, 7, 255));
    let before = base.clone();
    composite(&mut base, &Raster::transparent(Canvas::new(4, 4))).unwrap();
    assert_eq!(base, before);
}

#[test]
fn scrim_darkens_uniformly() {
    let mut base = Raster::solid(Canvas::new(2, 2), Rgba8::new(255, 255, 255, 255));
    composite_scrim(&mut base, Rgba8::new(0, 0, 0, 100));
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(base.pixel(x, y), Some([155, 155, 155, 255]));
        }
    }
}
