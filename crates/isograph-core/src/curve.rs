//! Cubic Bézier curves in 3D.
//!
//! Connectors are routed as a single cubic Bézier segment. The curve is
//! immutable once built; sampling is deterministic and bounded by fixed
//! sample counts.

use crate::geometry::Point3;

/// Number of chords used to approximate the arc length of a curve
pub const LENGTH_SAMPLES: usize = 64;

/// An immutable cubic Bézier curve defined by four control points.
///
/// # Examples
///
/// ```
/// # use isograph_core::curve::CubicBezier;
/// # use isograph_core::geometry::Point3;
/// let start = Point3::new(0.0, 0.0, 0.0);
/// let end = Point3::new(4.0, 0.0, 0.0);
/// let curve = CubicBezier::new(
///     start,
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     end,
/// );
///
/// assert_eq!(curve.sample_at(0.0), start);
/// assert_eq!(curve.sample_at(1.0), end);
/// assert_eq!(curve.sample_at(0.5), Point3::new(2.0, 1.5, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    start: Point3,
    control1: Point3,
    control2: Point3,
    end: Point3,
}

impl CubicBezier {
    /// Creates a curve from its four control points
    pub fn new(start: Point3, control1: Point3, control2: Point3, end: Point3) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Returns the first endpoint
    pub fn start(&self) -> Point3 {
        self.start
    }

    /// Returns the control point attached to the start
    pub fn control1(&self) -> Point3 {
        self.control1
    }

    /// Returns the control point attached to the end
    pub fn control2(&self) -> Point3 {
        self.control2
    }

    /// Returns the last endpoint
    pub fn end(&self) -> Point3 {
        self.end
    }

    /// Returns all four control points in order
    pub fn control_points(&self) -> [Point3; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    /// Evaluates the curve at parameter `t`.
    ///
    /// `t` is clamped to `[0, 1]`. The endpoints are returned exactly for
    /// `t = 0` and `t = 1`.
    pub fn sample_at(&self, t: f32) -> Point3 {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }

        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;

        self.start
            .scale(b0)
            .add_point(self.control1.scale(b1))
            .add_point(self.control2.scale(b2))
            .add_point(self.end.scale(b3))
    }

    /// Returns the first derivative of the curve at parameter `t`
    pub fn tangent_at(&self, t: f32) -> Point3 {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;

        let d0 = self.control1.sub_point(self.start).scale(3.0 * mt * mt);
        let d1 = self.control2.sub_point(self.control1).scale(6.0 * mt * t);
        let d2 = self.end.sub_point(self.control2).scale(3.0 * t * t);

        d0.add_point(d1).add_point(d2)
    }

    /// Samples the curve at `divisions + 1` evenly spaced parameters.
    ///
    /// The first and last points are the curve endpoints. Zero divisions
    /// yields only the start point.
    pub fn points(&self, divisions: usize) -> Vec<Point3> {
        if divisions == 0 {
            return vec![self.start];
        }

        (0..=divisions)
            .map(|i| self.sample_at(i as f32 / divisions as f32))
            .collect()
    }

    /// Approximates the arc length with [`LENGTH_SAMPLES`] chords
    pub fn length(&self) -> f32 {
        self.points(LENGTH_SAMPLES)
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }

    /// Returns the lowest y-coordinate among the control points.
    ///
    /// The curve lies in the convex hull of its control points, so no
    /// sample is lower than this value.
    pub fn min_control_y(&self) -> f32 {
        self.control_points()
            .iter()
            .map(|p| p.y())
            .fold(f32::INFINITY, f32::min)
    }
}
