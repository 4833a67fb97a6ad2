use image::RgbaImage;

use crate::effects::composite::apply_alpha;
use crate::foundation::core::AlphaMask;
use crate::foundation::error::{StickerResult, StickerWarning};
use crate::render::canvas::PremulCanvas;
use crate::render::caption::{CaptionPaint, paint_caption};
use crate::text::font::FontBackend;
use crate::text::layout::{CaptionStyle, LayoutResult};

/// Layers for one sticker. Optional layers are skipped when absent.
#[derive(Clone, Copy, Debug)]
pub struct ComposeInput<'a> {
    pub base: &'a RgbaImage,
    pub alpha: &'a AlphaMask,
    pub outline: Option<&'a RgbaImage>,
    pub shadow: Option<&'a RgbaImage>,
    pub caption: Option<&'a LayoutResult>,
    pub style: CaptionStyle,
}

#[derive(Clone, Debug)]
pub struct Composite {
    pub image: RgbaImage,
    pub warnings: Vec<StickerWarning>,
}

/// Stack the layers back to front: shadow, base cut out by `alpha`, outline, caption.
///
/// Without a font the caption is skipped and a [`StickerWarning::FontUnavailable`] is
/// reported instead of failing.
#[tracing::instrument(skip_all, fields(style = ?input.style))]
pub fn compose(
    input: ComposeInput<'_>,
    paint: &CaptionPaint,
    font: Option<&mut dyn FontBackend>,
) -> StickerResult<Composite> {
    let (width, height) = input.base.dimensions();
    let mut canvas = PremulCanvas::new(width, height);
    let mut warnings = Vec::new();

    let cutout = apply_alpha(input.base, input.alpha)?;
    if let Some(shadow) = input.shadow {
        canvas.over_image(shadow)?;
    }
    canvas.over_image(&cutout)?;
    if let Some(outline) = input.outline {
        canvas.over_image(outline)?;
    }

    match (input.style, input.caption) {
        (CaptionStyle::None, _) | (_, None) => {}
        (style, Some(layout)) => match font {
            Some(font) => paint_caption(&mut canvas, style, layout, paint, font)?,
            None => {
                tracing::warn!("no font available, caption skipped");
                warnings.push(StickerWarning::FontUnavailable {
                    message: "no font backend provided".to_string(),
                });
            }
        },
    }

    Ok(Composite {
        image: canvas.to_image()?,
        warnings,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
