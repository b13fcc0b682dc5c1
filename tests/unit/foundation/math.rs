use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_then_unpremultiply_is_stable_for_opaque_and_transparent() {
    let mut px = vec![10u8, 20, 30, 255, 200, 100, 50, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);

    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..], &[0, 0, 0, 0]);
}

#[test]
fn unpremultiply_recovers_half_alpha_color_within_rounding() {
    let mut px = vec![200u8, 100, 50, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px[..3].iter().zip([200u8, 100, 50]) {
        assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
    }
    assert_eq!(px[3], 128);
}

#[test]
fn clamp_premultiplied_caps_channels_at_alpha() {
    let mut px = vec![90u8, 40, 81, 80];
    clamp_premultiplied_in_place(&mut px);
    assert_eq!(px, vec![80, 40, 80, 80]);
}
