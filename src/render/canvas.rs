use image::RgbaImage;

use crate::effects::composite::{mul_div255, over, over_in_place, premultiply, unpremultiply};
use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::{StickerError, StickerResult};
use crate::text::font::GlyphCoverage;

/// Premultiplied RGBA8 accumulation buffer. Every layer is alpha-composited on top.
#[derive(Clone, Debug)]
pub struct PremulCanvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PremulCanvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Composite a straight-alpha raster of the same size over the canvas.
    pub fn over_image(&mut self, layer: &RgbaImage) -> StickerResult<()> {
        if layer.dimensions() != (self.width, self.height) {
            return Err(StickerError::validation(format!(
                "layer is {}x{}, canvas is {}x{}",
                layer.width(),
                layer.height(),
                self.width,
                self.height
            )));
        }
        over_in_place(&mut self.data, &premultiply(layer))
    }

    /// Composite a solid color over `rect`, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba8) {
        let src = color.to_premul();
        let x0 = rect.x.max(0) as u32;
        let y0 = rect.y.max(0) as u32;
        let x1 = rect.right().clamp(0, self.width as i32) as u32;
        let y1 = rect.bottom().clamp(0, self.height as i32) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_px(x, y, src);
            }
        }
    }

    /// Composite `color` through a coverage mask placed at `at + coverage.origin`.
    pub fn fill_coverage(&mut self, coverage: &GlyphCoverage, at: (i32, i32), color: Rgba8) {
        let ox = at.0 + coverage.origin.0;
        let oy = at.1 + coverage.origin.1;
        for cy in 0..coverage.height {
            let y = oy + cy as i32;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            for cx in 0..coverage.width {
                let x = ox + cx as i32;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let cov = coverage.get(cx, cy);
                if cov == 0 {
                    continue;
                }
                let a = mul_div255(u16::from(color.a), u16::from(cov));
                let src = Rgba8::new(color.r, color.g, color.b, a).to_premul();
                self.blend_px(x as u32, y as u32, src);
            }
        }
    }

    fn blend_px(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &mut self.data[i..i + 4];
        let out = over([px[0], px[1], px[2], px[3]], src);
        px.copy_from_slice(&out);
    }

    /// Straight-alpha copy of the canvas.
    pub fn to_image(&self) -> StickerResult<RgbaImage> {
        unpremultiply(&self.data, self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
