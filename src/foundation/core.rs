use image::{GrayImage, Luma};

use crate::foundation::error::{StickerError, StickerResult};

pub use image::RgbaImage;
pub use kurbo::Point;

/// Mask value for background pixels.
pub const MASK_OFF: u8 = 0;
/// Mask value for foreground pixels.
pub const MASK_ON: u8 = 255;

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied form of this color.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Integer pixel rectangle. `x`/`y` may be negative; `width`/`height` never are.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: Self) -> Self {
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Self::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

/// Face bounding box reported by a detection collaborator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl FaceBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Centroid used as the component-selection hint.
    pub fn center(self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Single-channel mask whose values are exactly 0 or 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask(GrayImage);

impl BinaryMask {
    /// Wrap a grayscale image, rejecting any value other than 0 or 255.
    pub fn new(image: GrayImage) -> StickerResult<Self> {
        if let Some((x, y, p)) = image
            .enumerate_pixels()
            .find(|(_, _, p)| p.0[0] != MASK_OFF && p.0[0] != MASK_ON)
        {
            return Err(StickerError::validation(format!(
                "binary mask value at ({x},{y}) is {}, expected 0 or 255",
                p.0[0]
            )));
        }
        Ok(Self(image))
    }

    /// All-background mask.
    pub fn zeros(width: u32, height: u32) -> Self {
        Self(GrayImage::new(width, height))
    }

    /// Build a mask from a predicate over pixel coordinates.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        Self(GrayImage::from_fn(width, height, |x, y| {
            Luma([if f(x, y) { MASK_ON } else { MASK_OFF }])
        }))
    }

    /// Threshold a row-major confidence map: `value > threshold` becomes foreground.
    pub fn from_confidence(
        confidence: &[f32],
        width: u32,
        height: u32,
        threshold: f32,
    ) -> StickerResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| StickerError::validation("confidence map size overflow"))?;
        if confidence.len() != expected {
            return Err(StickerError::validation(format!(
                "confidence map has {} values, expected {expected}",
                confidence.len()
            )));
        }
        if !threshold.is_finite() {
            return Err(StickerError::validation("confidence threshold must be finite"));
        }
        let w = width as usize;
        Ok(Self::from_fn(width, height, |x, y| {
            confidence[y as usize * w + x as usize] > threshold
        }))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn is_set(&self, x: u32, y: u32) -> bool {
        self.0.get_pixel(x, y).0[0] == MASK_ON
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.0.as_raw().iter().filter(|&&v| v == MASK_ON).count()
    }

    /// True when no pixel is foreground.
    pub fn is_empty(&self) -> bool {
        self.0.as_raw().iter().all(|&v| v == MASK_OFF)
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.0
    }

    pub fn into_image(self) -> GrayImage {
        self.0
    }

    /// Pixels set here and not in `other` (`self − other`). Sizes must match.
    pub fn difference(&self, other: &BinaryMask) -> StickerResult<BinaryMask> {
        if self.dimensions() != other.dimensions() {
            return Err(StickerError::mask_dimensions(
                other.dimensions(),
                self.dimensions(),
            ));
        }
        let (w, h) = self.dimensions();
        Ok(Self::from_fn(w, h, |x, y| {
            self.is_set(x, y) && !other.is_set(x, y)
        }))
    }

    /// Error unless this mask matches `(width, height)`.
    pub fn ensure_dimensions(&self, width: u32, height: u32) -> StickerResult<()> {
        if self.dimensions() != (width, height) {
            return Err(StickerError::mask_dimensions(
                self.dimensions(),
                (width, height),
            ));
        }
        Ok(())
    }
}

/// Continuous transparency field in `[0, 255]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask(GrayImage);

impl AlphaMask {
    pub(crate) fn from_gray(image: GrayImage) -> Self {
        Self(image)
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.0.get_pixel(x, y).0[0]
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.0
    }

    pub fn into_image(self) -> GrayImage {
        self.0
    }
}

impl From<BinaryMask> for AlphaMask {
    fn from(mask: BinaryMask) -> Self {
        Self(mask.0)
    }
}

/// Fully transparent raster of the given size.
pub fn transparent_raster(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
