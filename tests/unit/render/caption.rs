use super::*;
use crate::text::font::BlockFont;
use crate::text::layout::LaidOutLine;

fn one_line(style: CaptionStyle) -> LayoutResult {
    // "ab" at 20px with BlockFont: 20x24 line box.
    let bounds = PixelRect::new(40, 60, 20, 24);
    LayoutResult {
        style,
        font_size: 20,
        line_height: 24.0,
        lines: vec![LaidOutLine {
            text: "ab".to_string(),
            bounds,
        }],
        caption_box: PixelRect::new(10, 50, 80, 44),
        text_box: bounds,
        padding: 10,
        scale: 1.0,
        overflowed: false,
        truncated: false,
    }
}

fn thin_outline() -> CaptionPaint {
    CaptionPaint {
        outline_px: 2,
        ..CaptionPaint::default()
    }
}

#[test]
fn band_runs_from_caption_top_to_bottom() {
    let rect = band_rect(&one_line(CaptionStyle::Band), 100);
    assert_eq!(rect, PixelRect::new(10, 50, 80, 50));
}

#[test]
fn bubble_keeps_padding_from_canvas_sides() {
    let mut layout = one_line(CaptionStyle::Bubble);
    assert_eq!(bubble_rect(&layout, 100), PixelRect::new(30, 50, 40, 44));

    layout.text_box = PixelRect::new(5, 60, 95, 24);
    assert_eq!(bubble_rect(&layout, 100), PixelRect::new(10, 50, 80, 44));
}

#[test]
fn diamond_spread_is_l1_ball() {
    let dot = GlyphCoverage {
        width: 1,
        height: 1,
        coverage: vec![255],
        origin: (0, 0),
    };
    let spread = diamond_spread(&dot, 2);
    assert_eq!((spread.width, spread.height), (5, 5));
    assert_eq!(spread.origin, (-2, -2));
    assert_eq!(spread.get(2, 0), 255);
    assert_eq!(spread.get(1, 1), 255);
    assert_eq!(spread.get(0, 0), 0);
    assert_eq!(spread.get(4, 2), 255);
    assert_eq!(spread.get(4, 4), 0);
}

#[test]
fn diamond_spread_matches_direct_offset_max() {
    let src = GlyphCoverage {
        width: 7,
        height: 5,
        coverage: (0..35u32).map(|i| ((i * 37) % 11 * 23) as u8).collect(),
        origin: (3, -1),
    };
    let r = 3i32;
    let spread = diamond_spread(&src, r);
    assert_eq!((spread.width, spread.height), (13, 11));
    assert_eq!(spread.origin, (0, -4));

    for y in 0..spread.height as i32 {
        for x in 0..spread.width as i32 {
            let mut want = 0u8;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs() + dy.abs() > r {
                        continue;
                    }
                    let (sx, sy) = (x - r + dx, y - r + dy);
                    if (0..7).contains(&sx) && (0..5).contains(&sy) {
                        want = want.max(src.get(sx as u32, sy as u32));
                    }
                }
            }
            assert_eq!(spread.get(x as u32, y as u32), want, "at ({x},{y})");
        }
    }
}

#[test]
fn band_caption_paints_band_outline_and_fill() {
    let mut canvas = PremulCanvas::new(100, 100);
    let layout = one_line(CaptionStyle::Band);
    paint_caption(&mut canvas, CaptionStyle::Band, &layout, &thin_outline(), &mut BlockFont)
        .unwrap();
    let img = canvas.to_image().unwrap();

    // Glyph 'a' covers x 41..49, y 64..82 of the line box.
    assert_eq!(img.get_pixel(45, 70).0, [255, 255, 255, 255]);
    // Just left of the glyph: outline.
    assert_eq!(img.get_pixel(40, 70).0, [0, 0, 0, 255]);
    // Band only.
    assert_eq!(img.get_pixel(15, 95).0, [0, 0, 0, 100]);
    // Above the caption box and outside the band width.
    assert_eq!(img.get_pixel(50, 20).0[3], 0);
    assert_eq!(img.get_pixel(95, 95).0[3], 0);
}

#[test]
fn bubble_caption_casts_offset_shadow() {
    let mut canvas = PremulCanvas::new(100, 100);
    let layout = one_line(CaptionStyle::Bubble);
    paint_caption(&mut canvas, CaptionStyle::Bubble, &layout, &thin_outline(), &mut BlockFont)
        .unwrap();
    let img = canvas.to_image().unwrap();

    // Inside the shifted bubble, away from text and rounded corners.
    assert_eq!(img.get_pixel(60, 55).0, [0, 0, 0, 40]);
    // Left of the shifted bubble.
    assert_eq!(img.get_pixel(31, 70).0[3], 0);
    // Text still on top.
    assert_eq!(img.get_pixel(45, 70).0, [255, 255, 255, 255]);
}

#[test]
fn none_style_paints_nothing() {
    let mut canvas = PremulCanvas::new(100, 100);
    let layout = one_line(CaptionStyle::None);
    paint_caption(&mut canvas, CaptionStyle::None, &layout, &thin_outline(), &mut BlockFont)
        .unwrap();
    assert!(canvas.to_image().unwrap().pixels().all(|p| p.0[3] == 0));
}
