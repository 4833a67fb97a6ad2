use super::*;
use crate::foundation::core::{BinaryMask, PixelRect};
use crate::foundation::error::StickerError;
use crate::text::font::BlockFont;
use crate::text::layout::LaidOutLine;
use image::Rgba;

fn base() -> RgbaImage {
    RgbaImage::from_pixel(20, 20, Rgba([200, 10, 10, 255]))
}

fn subject() -> AlphaMask {
    AlphaMask::from(BinaryMask::from_fn(20, 20, |x, y| {
        (5..15).contains(&x) && (5..15).contains(&y)
    }))
}

fn caption() -> LayoutResult {
    let bounds = PixelRect::new(2, 14, 10, 6);
    LayoutResult {
        style: CaptionStyle::Band,
        font_size: 5,
        line_height: 6.0,
        lines: vec![LaidOutLine {
            text: "ab".to_string(),
            bounds,
        }],
        caption_box: PixelRect::new(0, 12, 20, 8),
        text_box: bounds,
        padding: 0,
        scale: 0.0,
        overflowed: false,
        truncated: false,
    }
}

#[test]
fn layers_stack_in_order() {
    let alpha = subject();
    let base = base();
    let shadow = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 70]));
    let mut outline = RgbaImage::new(20, 20);
    outline.put_pixel(4, 10, Rgba([255, 255, 255, 255]));
    outline.put_pixel(10, 10, Rgba([0, 255, 0, 255]));

    let out = compose(
        ComposeInput {
            base: &base,
            alpha: &alpha,
            outline: Some(&outline),
            shadow: Some(&shadow),
            caption: None,
            style: CaptionStyle::None,
        },
        &CaptionPaint::default(),
        None,
    )
    .unwrap();

    assert_eq!(out.image.get_pixel(0, 0).0, [0, 0, 0, 70]);
    assert_eq!(out.image.get_pixel(7, 7).0, [200, 10, 10, 255]);
    assert_eq!(out.image.get_pixel(4, 10).0, [255, 255, 255, 255]);
    assert_eq!(out.image.get_pixel(10, 10).0, [0, 255, 0, 255]);
    assert!(out.warnings.is_empty());
}

#[test]
fn caption_without_font_is_skipped_with_warning() {
    let alpha = subject();
    let base = base();
    let layout = caption();
    let input = ComposeInput {
        base: &base,
        alpha: &alpha,
        outline: None,
        shadow: None,
        caption: Some(&layout),
        style: CaptionStyle::Band,
    };
    let without = compose(input, &CaptionPaint::default(), None).unwrap();
    assert!(matches!(
        without.warnings.as_slice(),
        [StickerWarning::FontUnavailable { .. }]
    ));
    assert_eq!(without.image.get_pixel(1, 18).0[3], 0);

    let mut font = BlockFont;
    let with = compose(input, &CaptionPaint::default(), Some(&mut font as &mut dyn FontBackend)).unwrap();
    assert!(with.warnings.is_empty());
    assert_eq!(with.image.get_pixel(1, 18).0, [0, 0, 0, 100]);
}

#[test]
fn mismatched_alpha_is_rejected() {
    let alpha = AlphaMask::from(BinaryMask::zeros(19, 20));
    let base = base();
    let err = compose(
        ComposeInput {
            base: &base,
            alpha: &alpha,
            outline: None,
            shadow: None,
            caption: None,
            style: CaptionStyle::Bubble,
        },
        &CaptionPaint::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, StickerError::InvalidMaskDimensions { .. }));
}

#[test]
fn mismatched_layer_is_rejected() {
    let alpha = subject();
    let base = base();
    let shadow = RgbaImage::new(10, 10);
    let res = compose(
        ComposeInput {
            base: &base,
            alpha: &alpha,
            outline: None,
            shadow: Some(&shadow),
            caption: None,
            style: CaptionStyle::None,
        },
        &CaptionPaint::default(),
        None,
    );
    assert!(matches!(res, Err(StickerError::Validation(_))));
}
