use image::{Rgba, RgbaImage};

use crate::foundation::core::AlphaMask;
use crate::foundation::error::{StickerError, StickerResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels: `src + dst * (1 - src.a)`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let keep = 255 - u16::from(src[3]);
    if keep == 255 {
        return dst;
    }
    std::array::from_fn(|c| src[c].saturating_add(mul_div255(u16::from(dst[c]), keep)))
}

/// [`over`] for every pixel of two equal-length premultiplied RGBA8 buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> StickerResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StickerError::render(format!(
            "cannot composite a {}-byte layer onto a {}-byte buffer",
            src.len(),
            dst.len()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Premultiplied copy of a straight-alpha raster.
pub fn premultiply(image: &RgbaImage) -> Vec<u8> {
    let mut out = image.as_raw().clone();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255(u16::from(*c), a);
        }
    }
    out
}

/// Back to straight alpha. Fully transparent pixels come out as `(0,0,0,0)`.
pub fn unpremultiply(buf: &[u8], width: u32, height: u32) -> StickerResult<RgbaImage> {
    let mut out = buf.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    RgbaImage::from_raw(width, height, out)
        .ok_or_else(|| StickerError::render("premultiplied buffer does not match raster size"))
}

/// Straight-alpha `top` over `bottom`. Both rasters must share dimensions.
pub fn over_images(bottom: &RgbaImage, top: &RgbaImage) -> StickerResult<RgbaImage> {
    if bottom.dimensions() != top.dimensions() {
        return Err(StickerError::render(format!(
            "cannot composite {}x{} over {}x{}",
            top.width(),
            top.height(),
            bottom.width(),
            bottom.height()
        )));
    }
    let mut dst = premultiply(bottom);
    over_in_place(&mut dst, &premultiply(top))?;
    unpremultiply(&dst, bottom.width(), bottom.height())
}

/// Copy of `base` whose alpha channel is replaced by `alpha`.
pub fn apply_alpha(base: &RgbaImage, alpha: &AlphaMask) -> StickerResult<RgbaImage> {
    if alpha.dimensions() != base.dimensions() {
        return Err(StickerError::mask_dimensions(
            alpha.dimensions(),
            base.dimensions(),
        ));
    }
    let mut out = base.clone();
    for (x, y, px) in out.enumerate_pixels_mut() {
        let Rgba([r, g, b, _]) = *px;
        *px = Rgba([r, g, b, alpha.get(x, y)]);
    }
    Ok(out)
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
