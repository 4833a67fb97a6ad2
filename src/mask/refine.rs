use image::{GrayImage, Luma};

use crate::effects::blur::blur_gray8;
use crate::foundation::core::{AlphaMask, BinaryMask};
use crate::foundation::error::StickerResult;
use crate::mask::morphology::{close, distance_inside, distance_outside, open};

/// Closing then opening with disks of the given radii. A radius of 0 skips that step.
pub fn clean_mask(mask: &BinaryMask, close_kernel: u32, open_kernel: u32) -> BinaryMask {
    open(&close(mask, close_kernel), open_kernel)
}

/// Turn a clean binary mask into an alpha ramp across its boundary.
///
/// Pixels whose summed inside/outside edge distance reaches `feather` keep their binary
/// value. Closer pixels blend toward mid-grey by `(feather - edge) / feather` and are then
/// smoothed with a `2*feather+1` Gaussian.
pub fn feather_mask(cleaned: &BinaryMask, feather: u32) -> StickerResult<AlphaMask> {
    if feather == 0 {
        return Ok(AlphaMask::from(cleaned.clone()));
    }

    let f = f64::from(feather);
    let outside = distance_outside(cleaned);
    let inside = distance_inside(cleaned);
    let edge = |x: u32, y: u32| {
        (outside.get_pixel(x, y).0[0] + inside.get_pixel(x, y).0[0]).clamp(0.0, f)
    };

    let (w, h) = cleaned.dimensions();
    let blended = GrayImage::from_fn(w, h, |x, y| {
        let blend = ((f - edge(x, y)) / f).clamp(0.0, 1.0);
        let binary = if cleaned.is_set(x, y) { 255.0 } else { 0.0 };
        let v = binary * (1.0 - blend) + 127.5 * blend;
        Luma([v.round().clamp(0.0, 255.0) as u8])
    });

    let blurred = blur_gray8(&blended, feather)?;
    let out = GrayImage::from_fn(w, h, |x, y| {
        if edge(x, y) < f {
            *blurred.get_pixel(x, y)
        } else {
            *blended.get_pixel(x, y)
        }
    });
    Ok(AlphaMask::from_gray(out))
}

/// Clean up a selected subject mask and feather its edge into an alpha channel.
#[tracing::instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn refine(
    mask: &BinaryMask,
    feather: u32,
    close_kernel: u32,
    open_kernel: u32,
) -> StickerResult<AlphaMask> {
    let cleaned = clean_mask(mask, close_kernel, open_kernel);
    feather_mask(&cleaned, feather)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/refine.rs"]
mod tests;
