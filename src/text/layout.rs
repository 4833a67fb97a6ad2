use crate::foundation::core::PixelRect;
use crate::foundation::error::{StickerError, StickerResult};
use crate::text::font::FontBackend;
use crate::text::wrap::{WrappedText, wrap_with_font};

/// Canvas height the caption metrics are designed for; everything scales linearly from it.
pub const REFERENCE_HEIGHT: f64 = 370.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionStyle {
    /// Translucent dark band behind the text.
    Band,
    /// Soft rounded-rectangle drop shadow behind the text.
    #[default]
    Bubble,
    /// No caption.
    None,
}

/// Auto-fit search bounds, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FitLimits {
    /// Lower bound for the scaled starting size.
    pub min_start_font: u32,
    /// Smallest size tried, used even when the text does not fit.
    pub floor: u32,
    pub step: u32,
}

impl Default for FitLimits {
    fn default() -> Self {
        Self {
            min_start_font: 32,
            floor: 14,
            step: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutLine {
    pub text: String,
    /// Line box in canvas pixels; glyphs are drawn relative to its top-left.
    pub bounds: PixelRect,
}

/// Placement of a caption on one canvas. Built per render and never cached.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    pub style: CaptionStyle,
    pub font_size: u32,
    pub line_height: f32,
    pub lines: Vec<LaidOutLine>,
    /// Region reserved for the caption at the bottom of the canvas.
    pub caption_box: PixelRect,
    /// Union of the line boxes.
    pub text_box: PixelRect,
    pub padding: u32,
    /// Canvas height relative to [`REFERENCE_HEIGHT`].
    pub scale: f64,
    /// No size down to the floor fit the budget box.
    pub overflowed: bool,
    /// Lines were cut to `max_lines`.
    pub truncated: bool,
}

/// [`layout_with_limits`] with the default fit limits.
pub fn layout(
    text: &str,
    canvas_size: (u32, u32),
    style: CaptionStyle,
    max_lines: usize,
    base_font_size: u32,
    font: &mut dyn FontBackend,
) -> StickerResult<Option<LayoutResult>> {
    layout_with_limits(
        text,
        canvas_size,
        style,
        max_lines,
        base_font_size,
        FitLimits::default(),
        font,
    )
}

/// Pick the largest font size whose wrapped text fits the caption budget and place the lines.
///
/// Returns `None` for [`CaptionStyle::None`] and for empty text.
#[tracing::instrument(skip(text, font), fields(chars = text.chars().count()))]
pub fn layout_with_limits(
    text: &str,
    canvas_size: (u32, u32),
    style: CaptionStyle,
    max_lines: usize,
    base_font_size: u32,
    limits: FitLimits,
    font: &mut dyn FontBackend,
) -> StickerResult<Option<LayoutResult>> {
    if max_lines == 0 {
        return Err(StickerError::validation("max_lines must be >= 1"));
    }
    if limits.step == 0 || limits.floor == 0 {
        return Err(StickerError::validation(
            "caption fit step and floor must be >= 1",
        ));
    }
    if style == CaptionStyle::None || text.trim().is_empty() {
        return Ok(None);
    }

    let (width, height) = canvas_size;
    let scale = f64::from(height) / REFERENCE_HEIGHT;
    let start = limits
        .min_start_font
        .max((f64::from(base_font_size) * scale) as u32);
    let padding = (12.0 * scale) as u32;
    let budget_height = 120u32.max((f64::from(height) * 0.2) as u32);
    let avail_width = width.saturating_sub(2 * padding) as f32;
    let avail_height = budget_height.saturating_sub(2 * padding) as f32;

    let mut fitted = None;
    let mut size = start;
    while size > limits.floor {
        let wrapped = wrap_with_font(text, avail_width, max_lines, font, size as f32)?;
        let line_height = font.line_height(size as f32)?;
        if fits(&wrapped, line_height, avail_height) {
            fitted = Some((size, wrapped, line_height));
            break;
        }
        size = size.saturating_sub(limits.step);
    }

    let (font_size, wrapped, line_height, overflowed) = match fitted {
        Some((size, wrapped, lh)) => (size, wrapped, lh, false),
        None => {
            let size = limits.floor;
            let wrapped = wrap_with_font(text, avail_width, max_lines, font, size as f32)?;
            let lh = font.line_height(size as f32)?;
            let overflowed = !fits(&wrapped, lh, avail_height);
            if overflowed {
                tracing::warn!(font_size = size, "caption does not fit at the floor size");
            }
            (size, wrapped, lh, overflowed)
        }
    };
    if wrapped.lines.is_empty() {
        return Ok(None);
    }

    let block_height = (wrapped.lines.len() as f32 * line_height).ceil() as u32;
    let box_height = block_height + 2 * padding;
    let min_top = match style {
        CaptionStyle::Bubble => (f64::from(height) * 0.6) as i32,
        _ => (f64::from(height) * 0.5) as i32,
    };
    let anchored_top = height as i32 - padding as i32 - box_height as i32;
    let caption_box = PixelRect::new(
        padding as i32,
        anchored_top.max(min_top),
        avail_width as u32,
        box_height,
    );

    let text_top = caption_box.y + padding as i32;
    let mut lines = Vec::with_capacity(wrapped.lines.len());
    for (i, line) in wrapped.lines.iter().enumerate() {
        let line_width = font.measure(line, font_size as f32)?.width;
        let x = ((width as f32 - line_width) / 2.0).floor() as i32;
        let y = text_top + (i as f32 * line_height).round() as i32;
        lines.push(LaidOutLine {
            text: line.clone(),
            bounds: PixelRect::new(x, y, line_width.ceil() as u32, line_height.ceil() as u32),
        });
    }
    let text_box = lines
        .iter()
        .map(|l| l.bounds)
        .reduce(PixelRect::union)
        .unwrap_or_default();

    tracing::debug!(font_size, lines = lines.len(), overflowed, "caption laid out");
    Ok(Some(LayoutResult {
        style,
        font_size,
        line_height,
        lines,
        caption_box,
        text_box,
        padding,
        scale,
        overflowed,
        truncated: wrapped.truncated,
    }))
}

fn fits(wrapped: &WrappedText, line_height: f32, avail_height: f32) -> bool {
    !wrapped.truncated && wrapped.lines.len() as f32 * line_height <= avail_height
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
