use std::borrow::Cow;

use crate::foundation::error::{StickerError, StickerResult};

/// Size of a single line of shaped text, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// 8-bit coverage of one line of text.
///
/// `origin` is where the coverage's top-left pixel sits relative to the line's layout
/// origin (top-left of the line box). Coverage can extend past the box, hence signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphCoverage {
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
    pub origin: (i32, i32),
}

impl GlyphCoverage {
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.coverage[(y * self.width + x) as usize]
    }
}

/// Text measurement and rasterization used by caption layout and painting.
pub trait FontBackend {
    /// Extent of `text` laid out on a single line at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32) -> StickerResult<TextExtent>;

    /// Advance between consecutive baselines at `size_px`.
    fn line_height(&mut self, size_px: f32) -> StickerResult<f32> {
        Ok(self.measure("Hg", size_px)?.height)
    }

    /// Glyph coverage of `text` on a single line at `size_px`.
    fn rasterize(&mut self, text: &str, size_px: f32) -> StickerResult<GlyphCoverage>;
}

fn check_size(size_px: f32) -> StickerResult<()> {
    if !size_px.is_finite() || size_px <= 0.0 {
        return Err(StickerError::validation(
            "text size_px must be finite and > 0",
        ));
    }
    Ok(())
}

/// [`FontBackend`] over a single TrueType/OpenType font: shaped with parley and
/// rasterized with vello_cpu.
pub struct ParleyFontBackend {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for ParleyFontBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyFontBackend")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl ParleyFontBackend {
    /// Register `font_bytes` and use its first family for all layouts.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> StickerResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StickerError::font_unavailable("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StickerError::font_unavailable("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = %family_name, "registered caption font");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0),
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(&mut self, text: &str, size_px: f32) -> StickerResult<parley::Layout<()>> {
        check_size(size_px)?;
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl FontBackend for ParleyFontBackend {
    fn measure(&mut self, text: &str, size_px: f32) -> StickerResult<TextExtent> {
        let layout = self.layout(text, size_px)?;
        Ok(TextExtent {
            width: layout.width(),
            height: layout.height(),
        })
    }

    fn rasterize(&mut self, text: &str, size_px: f32) -> StickerResult<GlyphCoverage> {
        let layout = self.layout(text, size_px)?;
        let pad = (size_px * 0.25).ceil();
        let width = layout.width().ceil() + 2.0 * pad;
        let height = layout.height().ceil() + 2.0 * pad;
        let (Ok(w), Ok(h)) = (u16::try_from(width as u32), u16::try_from(height as u32)) else {
            return Err(StickerError::render("caption line exceeds raster limits"));
        };

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad),
            f64::from(pad),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let coverage = pixmap
            .data_as_u8_slice()
            .chunks_exact(4)
            .map(|px| px[3])
            .collect();
        Ok(GlyphCoverage {
            width: u32::from(w),
            height: u32::from(h),
            coverage,
            origin: (-(pad as i32), -(pad as i32)),
        })
    }
}

/// Deterministic font that draws every visible character as a filled box.
///
/// Narrow characters advance by half the font size, wide (CJK, fullwidth) characters by the
/// full size; lines are `6/5` of the size tall. Useful where exact pixel output must not depend
/// on a font file.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockFont;

impl BlockFont {
    pub fn advance(c: char, size_px: f32) -> f32 {
        if is_wide(c) { size_px } else { size_px * 0.5 }
    }

    pub fn line_height_for(size_px: f32) -> f32 {
        size_px * 6.0 / 5.0
    }
}

fn is_wide(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3040..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
    )
}

impl FontBackend for BlockFont {
    fn measure(&mut self, text: &str, size_px: f32) -> StickerResult<TextExtent> {
        check_size(size_px)?;
        Ok(TextExtent {
            width: text.chars().map(|c| Self::advance(c, size_px)).sum(),
            height: Self::line_height_for(size_px),
        })
    }

    fn line_height(&mut self, size_px: f32) -> StickerResult<f32> {
        check_size(size_px)?;
        Ok(Self::line_height_for(size_px))
    }

    fn rasterize(&mut self, text: &str, size_px: f32) -> StickerResult<GlyphCoverage> {
        let extent = self.measure(text, size_px)?;
        let width = extent.width.ceil() as u32;
        let height = extent.height.ceil() as u32;
        let mut coverage = vec![0u8; (width * height) as usize];

        let top = (size_px * 0.2).round() as u32;
        let bottom = ((size_px * 1.1).round() as u32).min(height);
        let mut pen = 0.0f32;
        for c in text.chars() {
            let adv = Self::advance(c, size_px);
            if !c.is_whitespace() {
                let x0 = (pen + adv * 0.1).round() as u32;
                let x1 = ((pen + adv * 0.9).round() as u32).min(width);
                for y in top..bottom {
                    let row = (y * width) as usize;
                    coverage[row + x0 as usize..row + x1 as usize].fill(255);
                }
            }
            pen += adv;
        }
        Ok(GlyphCoverage {
            width,
            height,
            coverage,
            origin: (0, 0),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
