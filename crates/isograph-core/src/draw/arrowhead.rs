//! Arrowhead overlay placed at the target end of a connector.

use crate::{curve::CubicBezier, geometry::Point3};

/// A direction marker at the end of a connector.
///
/// `tip` is the curve end point and `direction` the unit vector the curve
/// travels along when it arrives there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    tip: Point3,
    direction: Point3,
}

impl Arrowhead {
    /// Places an arrowhead at the end of `curve`.
    ///
    /// The direction is the normalized end tangent. When the last control
    /// point coincides with the end, the chord direction is used instead;
    /// fully degenerate curves get a zero direction.
    pub fn from_curve(curve: &CubicBezier) -> Self {
        let tangent = curve.tangent_at(1.0).normalize_or_zero();
        let direction = if tangent.is_zero() {
            curve.end().sub_point(curve.start()).normalize_or_zero()
        } else {
            tangent
        };

        Self {
            tip: curve.end(),
            direction,
        }
    }

    /// Returns the tip of the arrowhead
    pub fn tip(&self) -> Point3 {
        self.tip
    }

    /// Returns the unit travel direction (zero for degenerate curves)
    pub fn direction(&self) -> Point3 {
        self.direction
    }

    /// Returns the center of the arrowhead base for a head of the given length
    pub fn base(&self, length: f32) -> Point3 {
        self.tip.sub_point(self.direction.scale(length))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_arrowhead_follows_end_tangent() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        );
        let head = Arrowhead::from_curve(&curve);

        assert_eq!(head.tip(), curve.end());
        assert_approx_eq!(f32, head.direction().y(), -1.0);
        assert_approx_eq!(f32, head.base(0.5).y(), 0.5);
    }

    #[test]
    fn test_arrowhead_falls_back_to_chord() {
        let start = Point3::new(0.0, 0.0, 0.0);
        let end = Point3::new(0.0, 0.0, 3.0);
        let curve = CubicBezier::new(start, start, end, end);
        let head = Arrowhead::from_curve(&curve);

        assert_approx_eq!(f32, head.direction().z(), 1.0);
    }

    #[test]
    fn test_arrowhead_degenerate_curve() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let head = Arrowhead::from_curve(&CubicBezier::new(p, p, p, p));

        assert!(head.direction().is_zero());
        assert_eq!(head.base(1.0), p);
    }
}
