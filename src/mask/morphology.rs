use image::{GrayImage, ImageBuffer, Luma};
use imageproc::distance_transform::euclidean_squared_distance_transform;

use crate::foundation::core::{BinaryMask, MASK_OFF, MASK_ON};

/// Per-pixel Euclidean distances, row-major.
pub type DistanceField = ImageBuffer<Luma<f64>, Vec<f64>>;

/// Grow the foreground by a disk of `radius` pixels (diameter `2*radius+1`).
pub fn dilate(mask: &BinaryMask, radius: u32) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    let limit = f64::from(radius) * f64::from(radius);
    let sq = squared_distance_to_set(mask.as_image());
    BinaryMask::from_fn(mask.width(), mask.height(), |x, y| {
        sq.get_pixel(x, y).0[0] <= limit
    })
}

/// Shrink the foreground by a disk of `radius` pixels.
pub fn erode(mask: &BinaryMask, radius: u32) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    let limit = f64::from(radius) * f64::from(radius);
    let sq = squared_distance_to_set(&inverted(mask));
    BinaryMask::from_fn(mask.width(), mask.height(), |x, y| {
        sq.get_pixel(x, y).0[0] > limit
    })
}

/// Dilation followed by erosion. Fills holes and gaps narrower than the disk.
pub fn close(mask: &BinaryMask, radius: u32) -> BinaryMask {
    erode(&dilate(mask, radius), radius)
}

/// Erosion followed by dilation. Removes specks and spurs narrower than the disk.
pub fn open(mask: &BinaryMask, radius: u32) -> BinaryMask {
    dilate(&erode(mask, radius), radius)
}

/// Distance from every background pixel to the nearest foreground pixel (0 on the foreground).
///
/// An all-background mask yields infinite distances.
pub fn distance_outside(mask: &BinaryMask) -> DistanceField {
    sqrt_field(squared_distance_to_set(mask.as_image()))
}

/// Distance from every foreground pixel to the nearest background pixel (0 on the background).
pub fn distance_inside(mask: &BinaryMask) -> DistanceField {
    sqrt_field(squared_distance_to_set(&inverted(mask)))
}

/// Squared distance to the nearest non-zero pixel; infinite everywhere when there is none.
fn squared_distance_to_set(image: &GrayImage) -> DistanceField {
    if image.as_raw().iter().all(|&v| v == 0) {
        return DistanceField::from_pixel(image.width(), image.height(), Luma([f64::INFINITY]));
    }
    euclidean_squared_distance_transform(image)
}

fn inverted(mask: &BinaryMask) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        Luma([if mask.is_set(x, y) { MASK_OFF } else { MASK_ON }])
    })
}

fn sqrt_field(mut field: DistanceField) -> DistanceField {
    for p in field.pixels_mut() {
        p.0[0] = p.0[0].sqrt();
    }
    field
}

#[cfg(test)]
#[path = "../../tests/unit/mask/morphology.rs"]
mod tests;
