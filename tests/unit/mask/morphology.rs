use super::*;

fn square(size: u32, x0: u32, y0: u32, side: u32) -> BinaryMask {
    BinaryMask::from_fn(size, size, |x, y| {
        x >= x0 && x < x0 + side && y >= y0 && y < y0 + side
    })
}

#[test]
fn radius_zero_is_identity() {
    let mask = square(8, 2, 2, 3);
    assert_eq!(dilate(&mask, 0), mask);
    assert_eq!(close(&mask, 0), mask);
    assert_eq!(open(&mask, 0), mask);
}

#[test]
fn dilate_grows_by_a_disk() {
    let mask = BinaryMask::from_fn(11, 11, |x, y| x == 5 && y == 5);
    let grown = dilate(&mask, 2);
    assert!(grown.is_set(5, 5));
    assert!(grown.is_set(5, 3));
    assert!(grown.is_set(7, 5));
    assert!(grown.is_set(6, 6));
    assert!(!grown.is_set(5, 2));
    assert!(!grown.is_set(7, 7));
}

#[test]
fn erode_shrinks_square() {
    let mask = square(9, 2, 2, 5);
    let eroded = erode(&mask, 1);
    assert!(eroded.is_set(4, 4));
    assert!(eroded.is_set(3, 3));
    assert!(!eroded.is_set(2, 4));
    assert_eq!(eroded.foreground_count(), 9);
}

#[test]
fn close_fills_single_pixel_hole() {
    let mask = BinaryMask::from_fn(9, 9, |x, y| {
        (2..7).contains(&x) && (2..7).contains(&y) && !(x == 4 && y == 4)
    });
    assert!(close(&mask, 1).is_set(4, 4));
}

#[test]
fn open_removes_isolated_speck() {
    let mask = BinaryMask::from_fn(12, 12, |x, y| {
        ((4..10).contains(&x) && (4..10).contains(&y)) || (x == 0 && y == 0)
    });
    let opened = open(&mask, 1);
    assert!(!opened.is_set(0, 0));
    assert!(opened.is_set(6, 6));
}

#[test]
fn distance_fields_measure_to_the_boundary() {
    let mask = BinaryMask::from_fn(9, 1, |x, _| x < 4);
    let out = distance_outside(&mask);
    let inside = distance_inside(&mask);
    assert_eq!(out.get_pixel(2, 0).0[0], 0.0);
    assert_eq!(out.get_pixel(4, 0).0[0], 1.0);
    assert_eq!(out.get_pixel(7, 0).0[0], 4.0);
    assert_eq!(inside.get_pixel(3, 0).0[0], 1.0);
    assert_eq!(inside.get_pixel(0, 0).0[0], 4.0);
    assert_eq!(inside.get_pixel(5, 0).0[0], 0.0);
}
