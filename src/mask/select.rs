use image::{ImageBuffer, Luma};
use imageproc::region_labelling::{Connectivity, connected_components as label_components};

use crate::foundation::core::{BinaryMask, PixelRect, Point};

/// Per-pixel component labels; 0 is background.
pub type LabelImage = ImageBuffer<Luma<u32>, Vec<u32>>;

/// One 8-connected foreground region of a [`BinaryMask`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectedComponent {
    /// Label in the labelling image. Only meaningful within one labelling pass.
    pub label: u32,
    pub area: usize,
    pub centroid: Point,
    pub bounds: PixelRect,
}

#[derive(Default)]
struct Accum {
    first_seen: Option<usize>,
    area: usize,
    sum_x: f64,
    sum_y: f64,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

/// Label the 8-connected foreground regions, returned in the raster order they are first met.
pub fn connected_components(mask: &BinaryMask) -> (Vec<ConnectedComponent>, LabelImage) {
    let labels = label_components(mask.as_image(), Connectivity::Eight, Luma([0u8]));
    let max_label = labels.pixels().map(|p| p.0[0]).max().unwrap_or(0) as usize;

    let mut acc: Vec<Accum> = (0..=max_label).map(|_| Accum::default()).collect();
    for (i, (x, y, p)) in labels.enumerate_pixels().enumerate() {
        let label = p.0[0] as usize;
        if label == 0 {
            continue;
        }
        let a = &mut acc[label];
        if a.first_seen.is_none() {
            a.first_seen = Some(i);
            a.min_x = x;
            a.min_y = y;
            a.max_x = x;
            a.max_y = y;
        }
        a.area += 1;
        a.sum_x += f64::from(x);
        a.sum_y += f64::from(y);
        a.min_x = a.min_x.min(x);
        a.min_y = a.min_y.min(y);
        a.max_x = a.max_x.max(x);
        a.max_y = a.max_y.max(y);
    }

    let mut found: Vec<(usize, ConnectedComponent)> = acc
        .into_iter()
        .enumerate()
        .filter_map(|(label, a)| {
            let first = a.first_seen?;
            let n = a.area as f64;
            Some((
                first,
                ConnectedComponent {
                    label: label as u32,
                    area: a.area,
                    centroid: Point::new(a.sum_x / n, a.sum_y / n),
                    bounds: PixelRect::new(
                        a.min_x as i32,
                        a.min_y as i32,
                        a.max_x - a.min_x + 1,
                        a.max_y - a.min_y + 1,
                    ),
                },
            ))
        })
        .collect();
    found.sort_by_key(|(first, _)| *first);
    (found.into_iter().map(|(_, c)| c).collect(), labels)
}

/// Keep exactly one connected component of `mask`.
///
/// With a hint and two or more components the component whose centroid is nearest to the
/// hint wins; otherwise the largest area wins. Ties go to the component met first in raster
/// order. Masks with at most one component are returned unchanged.
#[tracing::instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn select(mask: &BinaryMask, hint: Option<Point>) -> BinaryMask {
    let (components, labels) = connected_components(mask);
    if components.len() <= 1 {
        return mask.clone();
    }

    let chosen = match hint {
        Some(hint) => components.iter().fold(&components[0], |best, c| {
            if c.centroid.distance(hint) < best.centroid.distance(hint) {
                c
            } else {
                best
            }
        }),
        None => components.iter().fold(&components[0], |best, c| {
            if c.area > best.area { c } else { best }
        }),
    };
    tracing::debug!(
        components = components.len(),
        label = chosen.label,
        area = chosen.area,
        by_hint = hint.is_some(),
        "selected subject component"
    );

    let label = chosen.label;
    BinaryMask::from_fn(mask.width(), mask.height(), |x, y| {
        labels.get_pixel(x, y).0[0] == label
    })
}

/// Drop components whose area is below `min_fraction` of the mask area.
pub fn remove_small_components(mask: &BinaryMask, min_fraction: f64) -> BinaryMask {
    if min_fraction <= 0.0 {
        return mask.clone();
    }
    let min_area = min_fraction * f64::from(mask.width()) * f64::from(mask.height());
    let (components, labels) = connected_components(mask);
    let keep: Vec<u32> = components
        .iter()
        .filter(|c| c.area as f64 >= min_area)
        .map(|c| c.label)
        .collect();
    if keep.len() == components.len() {
        return mask.clone();
    }
    tracing::debug!(
        removed = components.len() - keep.len(),
        min_area,
        "removed small mask components"
    );
    BinaryMask::from_fn(mask.width(), mask.height(), |x, y| {
        keep.contains(&labels.get_pixel(x, y).0[0])
    })
}

#[cfg(test)]
#[path = "../../tests/unit/mask/select.rs"]
mod tests;
