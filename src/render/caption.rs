use kurbo::Shape;

use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::{StickerError, StickerResult};
use crate::render::canvas::PremulCanvas;
use crate::text::font::{FontBackend, GlyphCoverage};
use crate::text::layout::{CaptionStyle, LayoutResult};

/// Colors and metrics used to paint a laid-out caption.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionPaint {
    pub text_color: Rgba8,
    pub outline_color: Rgba8,
    /// Text outline radius at the reference height; scaled with the canvas.
    pub outline_px: u32,
    pub band_color: Rgba8,
    pub bubble_shadow_color: Rgba8,
    pub bubble_radius: u32,
    pub bubble_shadow_offset: i32,
}

impl Default for CaptionPaint {
    fn default() -> Self {
        Self {
            text_color: Rgba8::WHITE,
            outline_color: Rgba8::BLACK,
            outline_px: 8,
            band_color: Rgba8::new(0, 0, 0, 100),
            bubble_shadow_color: Rgba8::new(0, 0, 0, 40),
            bubble_radius: 12,
            bubble_shadow_offset: 3,
        }
    }
}

/// Paint the caption background for `style` and then the outlined text.
pub fn paint_caption(
    canvas: &mut PremulCanvas,
    style: CaptionStyle,
    layout: &LayoutResult,
    paint: &CaptionPaint,
    font: &mut dyn FontBackend,
) -> StickerResult<()> {
    match style {
        CaptionStyle::None => return Ok(()),
        CaptionStyle::Band => paint_band(canvas, layout, paint),
        CaptionStyle::Bubble => paint_bubble_shadow(canvas, layout, paint)?,
    }
    paint_text(canvas, layout, paint, font)
}

/// Translucent band from the top of the caption box down to the bottom of the canvas.
pub fn band_rect(layout: &LayoutResult, canvas_height: u32) -> PixelRect {
    let top = layout.caption_box.y;
    let height = (canvas_height as i32 - top).max(0) as u32;
    PixelRect::new(layout.caption_box.x, top, layout.caption_box.width, height)
}

fn paint_band(canvas: &mut PremulCanvas, layout: &LayoutResult, paint: &CaptionPaint) {
    let rect = band_rect(layout, canvas.height());
    canvas.fill_rect(rect, paint.band_color);
}

/// Bubble rectangle around the text block before the shadow offset is applied.
///
/// Horizontal edges keep `padding` away from the canvas sides.
pub fn bubble_rect(layout: &LayoutResult, canvas_width: u32) -> PixelRect {
    let p = layout.padding as i32;
    let tb = layout.text_box;
    let x0 = p.max(tb.x - p);
    let x1 = (canvas_width as i32 - p).min(tb.right() + p).max(x0);
    let y0 = tb.y - p;
    let y1 = tb.bottom() + p;
    PixelRect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
}

fn paint_bubble_shadow(
    canvas: &mut PremulCanvas,
    layout: &LayoutResult,
    paint: &CaptionPaint,
) -> StickerResult<()> {
    let offset = paint.bubble_shadow_offset;
    let rect = bubble_rect(layout, canvas.width()).translate(offset, offset);
    let coverage = rounded_rect_coverage(
        canvas.width(),
        canvas.height(),
        rect,
        f64::from(paint.bubble_radius),
    )?;
    canvas.fill_coverage(&coverage, (0, 0), paint.bubble_shadow_color);
    Ok(())
}

/// Canvas-sized coverage of a rounded rectangle: an octagon joining the straight edges plus
/// one disk per corner.
fn rounded_rect_coverage(
    width: u32,
    height: u32,
    rect: PixelRect,
    radius: f64,
) -> StickerResult<GlyphCoverage> {
    let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(StickerError::render("canvas exceeds raster limits"));
    };
    let x0 = f64::from(rect.x);
    let y0 = f64::from(rect.y);
    let x1 = f64::from(rect.right());
    let y1 = f64::from(rect.bottom());
    let r = radius.min((x1 - x0) / 2.0).min((y1 - y0) / 2.0).max(0.0);

    let mut octagon = kurbo::BezPath::new();
    octagon.move_to((x0 + r, y0));
    octagon.line_to((x1 - r, y0));
    octagon.line_to((x1, y0 + r));
    octagon.line_to((x1, y1 - r));
    octagon.line_to((x1 - r, y1));
    octagon.line_to((x0 + r, y1));
    octagon.line_to((x0, y1 - r));
    octagon.line_to((x0, y0 + r));
    octagon.close_path();

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&bezpath_to_cpu(&octagon));
    if r > 0.0 {
        for center in [
            (x0 + r, y0 + r),
            (x1 - r, y0 + r),
            (x1 - r, y1 - r),
            (x0 + r, y1 - r),
        ] {
            let corner = kurbo::Circle::new(center, r).into_path(0.1);
            ctx.fill_path(&bezpath_to_cpu(&corner));
        }
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(GlyphCoverage {
        width,
        height,
        coverage: pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect(),
        origin: (0, 0),
    })
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Outlined text: every line is stamped in the outline color at each offset with
/// `|dx| + |dy| <= r`, then filled once in the text color. All outlines go down before any
/// fill so neighbouring lines never cover each other's fill.
fn paint_text(
    canvas: &mut PremulCanvas,
    layout: &LayoutResult,
    paint: &CaptionPaint,
    font: &mut dyn FontBackend,
) -> StickerResult<()> {
    let radius = (f64::from(paint.outline_px) * layout.scale) as i32;
    let mut glyphs = Vec::with_capacity(layout.lines.len());
    for line in &layout.lines {
        let coverage = font.rasterize(&line.text, layout.font_size as f32)?;
        glyphs.push(((line.bounds.x, line.bounds.y), coverage));
    }

    for (at, coverage) in &glyphs {
        let outline = diamond_spread(coverage, radius);
        canvas.fill_coverage(&outline, *at, paint.outline_color);
    }
    for (at, coverage) in &glyphs {
        canvas.fill_coverage(coverage, *at, paint.text_color);
    }
    Ok(())
}

/// Max of `coverage` over all offsets within L1 distance `radius`.
///
/// Built as `radius` passes of a 4-neighbour max, whose repeated sum is the L1 diamond.
fn diamond_spread(coverage: &GlyphCoverage, radius: i32) -> GlyphCoverage {
    if radius <= 0 {
        return coverage.clone();
    }
    let r = radius as u32;
    let width = coverage.width + 2 * r;
    let height = coverage.height + 2 * r;
    let (w, h) = (width as usize, height as usize);

    let mut cur = vec![0u8; w * h];
    for y in 0..coverage.height {
        let src = (y * coverage.width) as usize;
        let dst = (y + r) as usize * w + r as usize;
        cur[dst..dst + coverage.width as usize]
            .copy_from_slice(&coverage.coverage[src..src + coverage.width as usize]);
    }

    let mut next = vec![0u8; w * h];
    for _ in 0..radius {
        for y in 0..h {
            for x in 0..w {
                let i = y * w + x;
                let mut v = cur[i];
                if x > 0 {
                    v = v.max(cur[i - 1]);
                }
                if x + 1 < w {
                    v = v.max(cur[i + 1]);
                }
                if y > 0 {
                    v = v.max(cur[i - w]);
                }
                if y + 1 < h {
                    v = v.max(cur[i + w]);
                }
                next[i] = v;
            }
        }
        std::mem::swap(&mut cur, &mut next);
    }

    GlyphCoverage {
        width,
        height,
        coverage: cur,
        origin: (coverage.origin.0 - radius, coverage.origin.1 - radius),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
