use super::Point2;

/// Evaluates a quadratic Bezier curve at parameter `t` in `[0, 1]`.
///
/// `control` is the off-curve point; the curve starts at `start` and ends
/// at `end`, tangent to `control - start` and `end - control`.
#[must_use]
pub fn quadratic_point_at(start: &Point2, control: &Point2, end: &Point2, t: f64) -> Point2 {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point2::new(
        a * start.x + b * control.x + c * end.x,
        a * start.y + b * control.y + c * end.y,
    )
}

/// Samples `count` points along a quadratic Bezier, endpoints included.
///
/// `count < 2` yields only the start point.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sample_quadratic(start: &Point2, control: &Point2, end: &Point2, count: usize) -> Vec<Point2> {
    if count < 2 {
        return vec![*start];
    }
    let last = (count - 1) as f64;
    (0..count)
        .map(|i| quadratic_point_at(start, control, end, i as f64 / last))
        .collect()
}
