// Integer point geometry: cross products, convex hulls, angular ordering.
// Coordinates are screen-style (x right, y down) and stay well inside i32,
// so cross products only need an i64 widening to be exact.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cross product of (b - a) and (c - a), exact in i64.
/// Positive means b→c turns left of a→b in (x right, y up) terms.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> i64 {
    let abx = (b.x - a.x) as i64;
    let aby = (b.y - a.y) as i64;
    let acx = (c.x - a.x) as i64;
    let acy = (c.y - a.y) as i64;
    abx * acy - aby * acx
}

/// Convex hull by Andrew's monotone chain.
///
/// Returns only the corners (collinear boundary points are dropped), ordered
/// counterclockwise in (x right, y up) terms starting from the leftmost
/// point. Degenerate input degenerates gracefully: fewer than three distinct
/// points come back deduplicated as-is.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    pts.sort_unstable_by_key(|p| (p.x, p.y));
    pts.dedup();
    let n = pts.len();
    if n <= 2 {
        return pts;
    }

    let mut hull: Vec<Point> = Vec::with_capacity(n + 1);

    // Lower chain, left to right. `<= 0` pops collinear points too.
    for &p in &pts {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper chain, right to left, never eating into the lower chain.
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    // The upper chain closes on pts[0], which is already hull[0].
    hull.pop();
    hull
}

/// Arithmetic mean of the points as floating coordinates.
pub fn centroid(points: &[Point]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mut sx = 0.0;
    let mut sy = 0.0;
    for p in points {
        sx += p.x as f64;
        sy += p.y as f64;
    }
    let n = points.len() as f64;
    (sx / n, sy / n)
}

/// Order the points around their own centroid by descending `atan2` angle.
///
/// The sort is stable, so points at the exact same angle keep their incoming
/// order and the result is deterministic for a fixed input.
pub fn sort_around_centroid(points: &mut [Point]) {
    let (cx, cy) = centroid(points);
    points.sort_by(|a, b| {
        let ta = (a.y as f64 - cy).atan2(a.x as f64 - cx);
        let tb = (b.y as f64 - cy).atan2(b.x as f64 - cx);
        tb.total_cmp(&ta)
    });
}
