use image::{Rgba, RgbaImage};

use crate::effects::composite::{apply_alpha, over_images};
use crate::foundation::core::{AlphaMask, BinaryMask, Rgba8, transparent_raster};
use crate::foundation::error::StickerResult;
use crate::mask::morphology::dilate;

pub const OUTER_RING_COLOR: Rgba8 = Rgba8::WHITE;
pub const INNER_RING_COLOR: Rgba8 = Rgba8::opaque(230, 230, 240);

/// Two-ring outline layer around `mask`, transparent everywhere else.
///
/// The outer ring spans `outer_px` pixels beyond the subject, the inner ring `inner_px`, and
/// the inner ring is painted over the outer one. Keeping `inner_px < outer_px` is up to the
/// caller; otherwise the outer ring is hidden.
pub fn outline_rings(mask: &BinaryMask, outer_px: u32, inner_px: u32) -> StickerResult<RgbaImage> {
    let outer = dilate(mask, outer_px).difference(mask)?;
    let inner = dilate(mask, inner_px).difference(mask)?;

    let (w, h) = mask.dimensions();
    let mut rings = transparent_raster(w, h);
    for (x, y, px) in rings.enumerate_pixels_mut() {
        if inner.is_set(x, y) {
            *px = Rgba(INNER_RING_COLOR.to_array());
        } else if outer.is_set(x, y) {
            *px = Rgba(OUTER_RING_COLOR.to_array());
        }
    }
    Ok(rings)
}

/// Subject cut out of `base` by `mask` with the two-ring outline composited over it.
#[tracing::instrument(skip(base, mask))]
pub fn outline(
    base: &RgbaImage,
    mask: &BinaryMask,
    outer_px: u32,
    inner_px: u32,
) -> StickerResult<RgbaImage> {
    let cutout = apply_alpha(base, &AlphaMask::from(mask.clone()))?;
    let rings = outline_rings(mask, outer_px, inner_px)?;
    over_images(&cutout, &rings)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/outline.rs"]
mod tests;
