use super::*;

#[test]
fn zero_mask_has_zero_alpha() {
    let out = shadow(&BinaryMask::zeros(16, 16), (0, 2), 4, 70).unwrap();
    assert!(out.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn alpha_is_scaled_by_strength() {
    let mask = BinaryMask::from_fn(40, 40, |x, y| (10..30).contains(&x) && (10..30).contains(&y));
    let out = shadow(&mask, (0, 0), 2, 70).unwrap();
    assert_eq!(out.get_pixel(20, 20).0, [0, 0, 0, 70]);
    assert!(out.pixels().all(|p| p.0[3] <= 70));
    assert_eq!(out.get_pixel(0, 0).0[3], 0);
}

#[test]
fn shadow_follows_offset_and_clips() {
    let mask = BinaryMask::from_fn(20, 20, |x, y| x < 4 && (8..12).contains(&y));
    let out = shadow(&mask, (6, 3), 0, 255).unwrap();
    assert_eq!(out.get_pixel(7, 12).0, [0, 0, 0, 255]);
    assert_eq!(out.get_pixel(1, 10).0[3], 0);
    assert_eq!(out.get_pixel(7, 10).0[3], 0);
    assert_eq!(out.get_pixel(5, 12).0[3], 0);

    let clipped = shadow(&mask, (-10, 0), 0, 255).unwrap();
    assert!(clipped.pixels().all(|p| p.0[3] == 0));
}

#[test]
fn alpha_is_confined_near_the_translated_mask() {
    let mask = BinaryMask::from_fn(40, 40, |x, y| (15..20).contains(&x) && (15..20).contains(&y));
    let out = shadow(&mask, (0, 5), 3, 120).unwrap();
    for (x, y, p) in out.enumerate_pixels() {
        if p.0[3] > 0 {
            assert!((8..27).contains(&x), "x={x}");
            assert!((13..32).contains(&y), "y={y}");
        }
    }
}
