use super::*;

#[test]
fn defaults_match_sticker_presets() {
    let c = StickerConfig::default();
    assert_eq!(
        (c.mask.feather, c.mask.close_kernel, c.mask.open_kernel),
        (3, 5, 3)
    );
    assert_eq!((c.outline.outer_px, c.outline.inner_px), (10, 4));
    assert_eq!(c.shadow.offset, (0, 2));
    assert_eq!((c.shadow.blur_px, c.shadow.alpha), (4, 70));
    assert_eq!(c.caption.style, CaptionStyle::Bubble);
    assert_eq!((c.caption.font_size, c.caption.max_lines), (24, 2));
    assert_eq!(c.caption.paint.outline_px, 8);
    assert_eq!(c.caption.limits, FitLimits::default());
    c.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let c = StickerConfig::from_json_str(
        r#"{ "caption": { "style": "band", "max_lines": 3 }, "shadow": { "enabled": false } }"#,
    )
    .unwrap();
    assert_eq!(c.caption.style, CaptionStyle::Band);
    assert_eq!(c.caption.max_lines, 3);
    assert_eq!(c.caption.font_size, 24);
    assert!(!c.shadow.enabled);
    assert_eq!(c.shadow.blur_px, 4);
    assert_eq!(c.mask, MaskConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(
        StickerConfig::from_json_str(r#"{ "caption": { "max_lines": 0 } }"#),
        Err(StickerError::Validation(_))
    ));
    assert!(matches!(
        StickerConfig::from_json_str(r#"{ "select": { "min_component_fraction": 1.5 } }"#),
        Err(StickerError::Validation(_))
    ));
    assert!(matches!(
        StickerConfig::from_json_str(r#"{ "caption": { "style": "comic" } }"#),
        Err(StickerError::Serde(_))
    ));
}

#[test]
fn config_round_trips_through_json() {
    let c = StickerConfig::default();
    let back = StickerConfig::from_json_str(&c.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, c);
}
