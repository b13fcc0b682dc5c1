use super::*;

#[test]
fn defaults_match_reference_design() {
    let s = StyleConfig::default();
    assert_eq!(s.canvas, Canvas::new(1080, 1350));
    assert_eq!((s.margin, s.padding, s.corner_radius), (40, 30, 20));
    assert_eq!(s.line_height, 60);
    assert_eq!(s.max_title_length, 150);
    assert_eq!(s.box_fill, Rgba8::new(255, 255, 255, 240));
    assert_eq!(s.overlay_color, Rgba8::new(0, 0, 0, 100));
    assert_eq!(s.title_font.size_px, 48.0);
    assert_eq!(s.source_font.size_px, 24.0);
    assert_eq!(s.source_label, "Sumber");
    assert_eq!(s.gradient.height, 550);
    assert_eq!(s.gradient.color, Rgba8::new(0, 0, 0, 220));
    assert_eq!(s.output.quality, 95);
    assert_eq!(s.background.fallback_color, Rgba8::new(26, 26, 26, 255));
    assert_eq!(s.layout_kind().unwrap(), LayoutKind::Box);
    s.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let s = StyleConfig::from_json_str(
        r#"{
            "canvas": { "width": 1080, "height": 1080 },
            "layout": "gradient",
            "gradient": { "height": 400 },
            "overlay_color": [0, 0, 0, 0]
        }"#,
    )
    .unwrap();
    assert_eq!(s.canvas, Canvas::new(1080, 1080));
    assert_eq!(s.layout_kind().unwrap(), LayoutKind::Gradient);
    assert_eq!(s.gradient.height, 400);
    assert_eq!(s.gradient.gamma, 0.6);
    assert_eq!(s.overlay_color, Rgba8::new(0, 0, 0, 0));
    assert_eq!(s.margin, 40);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = StyleConfig::from_json_str(r#"{ "margn": 10 }"#).unwrap_err();
    assert!(matches!(err, PostlineError::Serde(_)));
}

#[test]
fn unknown_layout_is_configuration_error() {
    let s = StyleConfig {
        layout: "carousel".to_string(),
        ..StyleConfig::default()
    };
    assert!(matches!(
        s.validate().unwrap_err(),
        PostlineError::Configuration(_)
    ));
}

#[test]
fn validate_rejects_unrenderable_values() {
    let cases: Vec<StyleConfig> = vec![
        StyleConfig {
            canvas: Canvas::new(0, 100),
            ..StyleConfig::default()
        },
        StyleConfig {
            canvas: Canvas::new(70_000, 100),
            ..StyleConfig::default()
        },
        StyleConfig {
            margin: 520,
            ..StyleConfig::default()
        },
        StyleConfig {
            line_height: 0,
            ..StyleConfig::default()
        },
        StyleConfig {
            title_font: FontDescriptor::new("x.ttf", f32::NAN),
            ..StyleConfig::default()
        },
        StyleConfig {
            gradient: GradientStyle {
                gamma: 0.0,
                ..GradientStyle::default()
            },
            ..StyleConfig::default()
        },
        StyleConfig {
            output: OutputConfig {
                quality: 101,
                ..OutputConfig::default()
            },
            ..StyleConfig::default()
        },
    ];
    for s in cases {
        let err = s.validate().unwrap_err();
        assert!(matches!(err, PostlineError::Configuration(_)), "{err}");
    }
}

#[test]
fn box_text_width_uses_margin_and_padding() {
    assert_eq!(StyleConfig::default().box_text_width(), 940.0);
}

#[test]
fn style_roundtrips_through_json() {
    let s = StyleConfig::default();
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(StyleConfig::from_json_str(&json).unwrap(), s);
}
