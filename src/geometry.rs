//! Geometric primitives for the sweep
//!
//! Stateless predicates and constructions over `DVec2` points. The sweep line
//! moves from high y to low y, so every parabola here opens upward with its
//! focus above the directrix.

use glam::DVec2;
use std::cmp::Ordering;

/// Tolerance used when comparing breakpoints and sweep heights
pub const EPSILON: f64 = 1e-9;

/// Turn direction of an ordered point triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// A circle given by its center and radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    /// Lowest point of the circle, where a descending sweep line first touches it
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.center.y - self.radius
    }
}

/// Orientation of `(p, q, r)` from the sign of `(q - p) x (r - p)`
///
/// Zero is tested exactly, so nearly collinear triples are classified by
/// whatever sign the rounding produces.
pub fn orientation(p: DVec2, q: DVec2, r: DVec2) -> Orientation {
    let cross = (q - p).perp_dot(r - p);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Circle through three points, or `None` when they are collinear
pub fn circumcircle(a: DVec2, b: DVec2, c: DVec2) -> Option<Circle> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d == 0.0 {
        return None;
    }

    let a2 = a.length_squared();
    let b2 = b.length_squared();
    let c2 = c.length_squared();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = DVec2::new(ux, uy);

    Some(Circle {
        center,
        radius: center.distance(a),
    })
}

/// Height of the parabola with `focus` and directrix `y = sweep_y` at `x`
///
/// Returns `f64::INFINITY` when the focus lies on the directrix; the parabola
/// then degenerates into a vertical ray above the focus.
pub fn parabola_y(focus: DVec2, x: f64, sweep_y: f64) -> f64 {
    let dp = 2.0 * (focus.y - sweep_y);
    if dp == 0.0 {
        return f64::INFINITY;
    }
    let dx = x - focus.x;
    dx * dx / dp + (focus.y + sweep_y) * 0.5
}

/// X coordinate of the breakpoint between the arc of `p` (left) and the arc
/// of `r` (right) for a sweep line at `sweep_y`
///
/// # Degenerate cases
///
/// - equal site heights: midpoint of the two x coordinates
/// - a site on the sweep line: that site's x
/// - vanishing quadratic term: the linear solution
/// - negative discriminant: midpoint
pub fn find_intersection(p: DVec2, r: DVec2, sweep_y: f64) -> f64 {
    if p.y == r.y {
        return (p.x + r.x) * 0.5;
    }
    if p.y == sweep_y {
        return p.x;
    }
    if r.y == sweep_y {
        return r.x;
    }

    let dp = p.y - sweep_y;
    let dr = r.y - sweep_y;

    // dr * (x - px)^2 - dp * (x - rx)^2 + dp * dr * (py - ry) = 0
    let a = dr - dp;
    let b = 2.0 * (dp * r.x - dr * p.x);
    let c = dr * p.x * p.x - dp * r.x * r.x + dp * dr * (p.y - r.y);

    if a.abs() < EPSILON {
        if b == 0.0 {
            return (p.x + r.x) * 0.5;
        }
        return -c / b;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return (p.x + r.x) * 0.5;
    }

    let sqrt_d = discriminant.sqrt();
    let x1 = (-b + sqrt_d) / (2.0 * a);
    let x2 = (-b - sqrt_d) / (2.0 * a);

    // The lower (narrower) arc sits between two pieces of the higher one
    if p.y < r.y {
        x1.max(x2)
    } else {
        x1.min(x2)
    }
}

/// Direction a breakpoint between `left` and `right` travels as the sweep descends
///
/// The result is perpendicular to `right - left` and has unit length.
pub fn bisector_direction(left: DVec2, right: DVec2) -> DVec2 {
    DVec2::new(right.y - left.y, left.x - right.x).normalize_or_zero()
}

/// Sweep ordering of two event positions `(x, y)`
///
/// Larger y comes first; on equal y, smaller x comes first.
pub fn compare_events(a: DVec2, b: DVec2) -> Ordering {
    if a.y != b.y {
        return b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal);
    }
    a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
}
