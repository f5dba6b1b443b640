// Uniform vertex sampling inside the canvas, minus optional margins.

use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Draw `count` independent uniform points with x in [1, width - width_margin]
/// and y in [1, height - height_margin], both ends inclusive.
///
/// Margins shrink the box from the right/bottom only; the left/top edge stays
/// at 1. An empty range on either axis is `InvalidDimension`.
pub fn sample_points(
    rng: &mut impl Rng,
    count: usize,
    width: u32,
    height: u32,
    width_margin: u32,
    height_margin: u32,
) -> Result<Vec<Point>> {
    if width <= width_margin || height <= height_margin {
        return Err(Error::InvalidDimension {
            width,
            height,
            width_margin,
            height_margin,
        });
    }
    let max_x = (width - width_margin) as i32;
    let max_y = (height - height_margin) as i32;

    let mut points = Vec::with_capacity(count);
    for _ in 0..count {
        points.push(Point::new(
            rng.gen_range(1..=max_x),
            rng.gen_range(1..=max_y),
        ));
    }
    Ok(points)
}
