use image::GrayImage;

use crate::foundation::error::{StickerError, StickerResult};

/// Default sigma for a `2*radius+1` kernel: `0.3 * ((k - 1) / 2 - 1) + 0.8`.
pub fn sigma_for_radius(radius: u32) -> f32 {
    let ksize = (2 * radius + 1) as f32;
    0.3 * ((ksize - 1.0) * 0.5 - 1.0) + 0.8
}

/// Separable Gaussian blur of a single-channel image with a `2*radius+1` kernel.
///
/// Borders clamp to the edge pixel, so a constant image is left unchanged.
pub fn blur_gray8(src: &GrayImage, radius: u32) -> StickerResult<GrayImage> {
    blur_gray8_with_sigma(src, radius, sigma_for_radius(radius))
}

/// [`blur_gray8`] with an explicit sigma.
pub fn blur_gray8_with_sigma(src: &GrayImage, radius: u32, sigma: f32) -> StickerResult<GrayImage> {
    let (width, height) = src.dimensions();
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.clone());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let len = src.as_raw().len();
    let mut tmp = vec![0u8; len];
    let mut out = vec![0u8; len];

    horizontal_pass(src.as_raw(), &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    GrayImage::from_raw(width, height, out)
        .ok_or_else(|| StickerError::render("blur produced a buffer of unexpected size"))
}

const Q16_ONE: i64 = 1 << 16;

/// Normalized Gaussian taps in Q16. The center tap absorbs rounding so the taps sum to one.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> StickerResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StickerError::validation("blur sigma must be > 0"));
    }

    let two_sigma_sq = 2.0 * f64::from(sigma).powi(2);
    let r = i64::from(radius);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let total: f64 = raw.iter().sum();

    let mut taps: Vec<i64> = raw
        .iter()
        .map(|w| (w / total * Q16_ONE as f64).round() as i64)
        .collect();
    let drift = Q16_ONE - taps.iter().sum::<i64>();
    taps[radius as usize] = (taps[radius as usize] + drift).clamp(0, Q16_ONE);

    Ok(taps.into_iter().map(|t| t as u32).collect())
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        let row = (y * w) as usize;
        for x in 0..w {
            let acc: u64 = k
                .iter()
                .enumerate()
                .map(|(ki, &kw)| {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    u64::from(kw) * u64::from(src[row + sx as usize])
                })
                .sum();
            dst[row + x as usize] = q16_to_u8(acc);
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let acc: u64 = k
                .iter()
                .enumerate()
                .map(|(ki, &kw)| {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    u64::from(kw) * u64::from(src[(sy * w + x) as usize])
                })
                .sum();
            dst[(y * w + x) as usize] = q16_to_u8(acc);
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
