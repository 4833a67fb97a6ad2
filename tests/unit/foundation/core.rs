use super::*;

#[test]
fn binary_mask_rejects_non_binary_values() {
    let mut img = GrayImage::new(3, 3);
    img.put_pixel(1, 1, Luma([128]));
    let err = BinaryMask::new(img).unwrap_err();
    assert!(err.to_string().contains("(1,1)"));
}

#[test]
fn binary_mask_accepts_0_and_255() {
    let mut img = GrayImage::new(3, 3);
    img.put_pixel(2, 0, Luma([255]));
    let mask = BinaryMask::new(img).unwrap();
    assert!(mask.is_set(2, 0));
    assert!(!mask.is_set(0, 0));
    assert_eq!(mask.foreground_count(), 1);
    assert!(!mask.is_empty());
}

#[test]
fn zeros_is_empty() {
    let mask = BinaryMask::zeros(4, 2);
    assert!(mask.is_empty());
    assert_eq!(mask.dimensions(), (4, 2));
}

#[test]
fn from_confidence_thresholds_strictly() {
    let conf = [0.95f32, 0.9, 0.1, 1.0];
    let mask = BinaryMask::from_confidence(&conf, 2, 2, 0.9).unwrap();
    assert!(mask.is_set(0, 0));
    assert!(!mask.is_set(1, 0));
    assert!(!mask.is_set(0, 1));
    assert!(mask.is_set(1, 1));
}

#[test]
fn from_confidence_rejects_wrong_length() {
    assert!(BinaryMask::from_confidence(&[0.5; 3], 2, 2, 0.9).is_err());
}

#[test]
fn difference_removes_other_pixels() {
    let a = BinaryMask::from_fn(4, 4, |x, _| x < 3);
    let b = BinaryMask::from_fn(4, 4, |x, _| x < 1);
    let d = a.difference(&b).unwrap();
    assert!(!d.is_set(0, 0));
    assert!(d.is_set(1, 0));
    assert!(d.is_set(2, 3));
    assert!(!d.is_set(3, 3));
}

#[test]
fn difference_rejects_size_mismatch() {
    let a = BinaryMask::zeros(4, 4);
    let b = BinaryMask::zeros(3, 4);
    assert!(matches!(
        a.difference(&b),
        Err(StickerError::InvalidMaskDimensions { .. })
    ));
}

#[test]
fn premul_of_opaque_is_identity() {
    assert_eq!(Rgba8::opaque(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::new(255, 255, 255, 128).to_premul(), [128, 128, 128, 128]);
}

#[test]
fn pixel_rect_edges_and_union() {
    let a = PixelRect::new(2, 3, 4, 5);
    assert_eq!(a.right(), 6);
    assert_eq!(a.bottom(), 8);
    assert!(a.contains(2, 3));
    assert!(!a.contains(6, 3));
    let b = PixelRect::new(-1, 4, 2, 10);
    assert_eq!(a.union(b), PixelRect::new(-1, 3, 7, 11));
}

#[test]
fn face_box_center() {
    let c = FaceBox::new(10.0, 20.0, 4.0, 6.0).center();
    assert_eq!((c.x, c.y), (12.0, 23.0));
}
