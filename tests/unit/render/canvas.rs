use super::*;
use image::Rgba;

#[test]
fn new_canvas_is_transparent() {
    let canvas = PremulCanvas::new(3, 2);
    let img = canvas.to_image().unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn fill_rect_clips_to_canvas() {
    let mut canvas = PremulCanvas::new(4, 4);
    canvas.fill_rect(PixelRect::new(-2, 2, 4, 10), Rgba8::opaque(9, 8, 7));
    let img = canvas.to_image().unwrap();
    assert_eq!(img.get_pixel(0, 3).0, [9, 8, 7, 255]);
    assert_eq!(img.get_pixel(1, 2).0, [9, 8, 7, 255]);
    assert_eq!(img.get_pixel(2, 2).0[3], 0);
    assert_eq!(img.get_pixel(0, 1).0[3], 0);
}

#[test]
fn coverage_scales_color_alpha() {
    let mut canvas = PremulCanvas::new(4, 1);
    let cov = GlyphCoverage {
        width: 2,
        height: 1,
        coverage: vec![255, 0],
        origin: (1, 0),
    };
    canvas.fill_coverage(&cov, (0, 0), Rgba8::new(0, 0, 0, 40));
    let img = canvas.to_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 40]);
    assert_eq!(img.get_pixel(2, 0).0[3], 0);
}

#[test]
fn over_image_rejects_size_mismatch() {
    let mut canvas = PremulCanvas::new(4, 4);
    assert!(canvas.over_image(&RgbaImage::new(4, 3)).is_err());
    let layer = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
    canvas.over_image(&layer).unwrap();
    assert_eq!(canvas.to_image().unwrap().get_pixel(3, 3).0, [1, 2, 3, 255]);
}
