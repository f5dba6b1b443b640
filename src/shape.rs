// The two polygon constructions: convex (hull completion) and concave
// (angular ordering around the centroid).

use log::debug;
use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::{self, Point};

/// Hull completion gives up after this many injection rounds. Late rounds
/// inject only the last point or two, so ordinary canvases can take a few
/// hundred rounds to corner the final vertex; only inputs with no room for
/// the hull at all (a 1x1 canvas) should ever reach the cap.
const MAX_INJECTION_ROUNDS: usize = 4096;

/// Reduce `vertices` to a convex contour with exactly `sides` corners.
///
/// The hull of the input usually has fewer corners than requested, so extra
/// uniform points are injected anywhere in [1, width] x [1, height] (sampling
/// margins deliberately do not apply here) and the hull is recomputed until
/// it reaches the target. Each round injects exactly the missing count, so
/// the hull can land on the target but never grow past it on its own; inputs
/// whose hull already exceeds `sides` fail with `HullOvershoot` instead of
/// having corners discarded.
pub fn convex_contour(
    rng: &mut impl Rng,
    mut vertices: Vec<Point>,
    sides: usize,
    width: u32,
    height: u32,
) -> Result<Vec<Point>> {
    if sides < 3 {
        return Err(Error::InsufficientVertices {
            requested: sides,
            available: vertices.len(),
        });
    }

    let mut hull = geometry::convex_hull(&vertices);
    let mut rounds = 0;
    while hull.len() < sides {
        if rounds == MAX_INJECTION_ROUNDS {
            return Err(Error::ConvergenceFailure {
                target: sides,
                rounds,
            });
        }
        let missing = sides - hull.len();
        for _ in 0..missing {
            vertices.push(Point::new(
                rng.gen_range(1..=width as i32),
                rng.gen_range(1..=height as i32),
            ));
        }
        hull = geometry::convex_hull(&vertices);
        rounds += 1;
        debug!(
            "hull completion round {rounds}: {} of {sides} corners",
            hull.len()
        );
    }

    if hull.len() > sides {
        return Err(Error::HullOvershoot {
            target: sides,
            reached: hull.len(),
        });
    }
    Ok(hull)
}

/// Order `vertices` around their centroid by descending angle and keep the
/// first `sides` of them.
///
/// The centroid and the ordering are computed over the whole input before
/// truncation. The result is star-shaped-ish but not guaranteed simple; the
/// even-odd fill copes with self-intersections.
pub fn concave_contour(mut vertices: Vec<Point>, sides: usize) -> Result<Vec<Point>> {
    if sides < 3 || sides > vertices.len() {
        return Err(Error::InsufficientVertices {
            requested: sides,
            available: vertices.len(),
        });
    }
    geometry::sort_around_centroid(&mut vertices);
    vertices.truncate(sides);
    Ok(vertices)
}
