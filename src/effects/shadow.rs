use image::{Rgba, RgbaImage};

use crate::effects::blur::blur_gray8;
use crate::foundation::core::{BinaryMask, transparent_raster};
use crate::foundation::error::StickerResult;
use crate::mask::morphology::dilate;

/// Soft black shadow of `mask`, shifted by `offset`.
///
/// The mask is grown by `blur_px`, blurred with a `2*blur_px+1` Gaussian and scaled by
/// `alpha_strength / 255`. Pixels shifted past the canvas edge are dropped.
#[tracing::instrument(skip(mask))]
pub fn shadow(
    mask: &BinaryMask,
    offset: (i32, i32),
    blur_px: u32,
    alpha_strength: u8,
) -> StickerResult<RgbaImage> {
    let grown = dilate(mask, blur_px);
    let blurred = blur_gray8(grown.as_image(), blur_px)?;

    let (w, h) = mask.dimensions();
    let (dx, dy) = offset;
    let mut out = transparent_raster(w, h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let sx = i64::from(x) - i64::from(dx);
        let sy = i64::from(y) - i64::from(dy);
        if sx < 0 || sy < 0 || sx >= i64::from(w) || sy >= i64::from(h) {
            continue;
        }
        let v = u32::from(blurred.get_pixel(sx as u32, sy as u32).0[0]);
        let a = (v * u32::from(alpha_strength) / 255) as u8;
        *px = Rgba([0, 0, 0, a]);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shadow.rs"]
mod tests;
