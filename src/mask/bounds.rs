use image::RgbaImage;
use image::imageops;

use crate::foundation::core::{BinaryMask, PixelRect};
use crate::foundation::error::StickerResult;

/// Tight bounding box of the foreground, or `None` for an empty mask.
pub fn subject_bounds(mask: &BinaryMask) -> Option<PixelRect> {
    let mut extent: Option<(u32, u32, u32, u32)> = None;
    for (x, y, p) in mask.as_image().enumerate_pixels() {
        if p.0[0] == 0 {
            continue;
        }
        extent = Some(match extent {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    extent.map(|(x0, y0, x1, y1)| PixelRect::new(x0 as i32, y0 as i32, x1 - x0 + 1, y1 - y0 + 1))
}

/// Result of [`crop_to_subject`]. `rect` is the region of the source that was kept.
#[derive(Clone, Debug)]
pub struct SubjectCrop {
    pub image: RgbaImage,
    pub mask: BinaryMask,
    pub rect: PixelRect,
}

/// Crop image and mask to the subject plus a margin of `margin_ratio` of its size per side.
///
/// Subjects whose bounding box covers less than `min_fraction` of the canvas are treated as
/// noise and the full frame is kept.
pub fn crop_to_subject(
    image: &RgbaImage,
    mask: &BinaryMask,
    margin_ratio: f64,
    min_fraction: f64,
) -> StickerResult<SubjectCrop> {
    let (w, h) = image.dimensions();
    mask.ensure_dimensions(w, h)?;

    let full = SubjectCrop {
        image: image.clone(),
        mask: mask.clone(),
        rect: PixelRect::new(0, 0, w, h),
    };
    let Some(bounds) = subject_bounds(mask) else {
        return Ok(full);
    };
    let canvas_area = f64::from(w) * f64::from(h);
    if f64::from(bounds.width) * f64::from(bounds.height) < canvas_area * min_fraction {
        tracing::debug!(?bounds, "subject too small to crop");
        return Ok(full);
    }

    let margin_x = (f64::from(bounds.width) * margin_ratio) as i32;
    let margin_y = (f64::from(bounds.height) * margin_ratio) as i32;
    let x0 = (bounds.x - margin_x).max(0);
    let y0 = (bounds.y - margin_y).max(0);
    let x1 = (bounds.right() + margin_x).min(w as i32);
    let y1 = (bounds.bottom() + margin_y).min(h as i32);
    let rect = PixelRect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32);

    let cropped_image =
        imageops::crop_imm(image, rect.x as u32, rect.y as u32, rect.width, rect.height).to_image();
    let cropped_mask = BinaryMask::new(
        imageops::crop_imm(mask.as_image(), rect.x as u32, rect.y as u32, rect.width, rect.height)
            .to_image(),
    )?;
    Ok(SubjectCrop {
        image: cropped_image,
        mask: cropped_mask,
        rect,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/mask/bounds.rs"]
mod tests;
