//! Geometric primitives for 3D diagram scenes.
//!
//! This module provides the fundamental geometric types used throughout
//! Isograph for positioning elements and routing connectors between them.
//!
//! # Overview
//!
//! - [`Point3`] - A 3D coordinate (also used as a direction vector)
//! - [`Size3`] - Width, height and depth dimensions
//! - [`Bounds3`] - An axis-aligned bounding box defined by minimum and maximum corners
//! - [`Axis`] - One of the three coordinate axes
//!
//! # Coordinate System
//!
//! Isograph uses a right-handed, Y-up coordinate system:
//!
//! ```text
//!          +Y
//!           │
//!           │
//!           │
//!           └────────► +X
//!          ╱
//!         ╱
//!        ▼
//!      +Z
//! ```
//!
//! - **Y-axis**: Vertical, increases upward. Platforms are wide and flat in X/Z.
//! - **X-axis**: Horizontal, increases eastward.
//! - **Z-axis**: Horizontal, increases southward (toward the viewer).

/// One of the three coordinate axes.
///
/// The declaration order (`X`, `Y`, `Z`) is also the priority order used
/// when two axes are equally dominant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in priority order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// A 3D point representing a position in scene space.
///
/// Points use `f32` coordinates and double as direction vectors for the
/// basic vector math needed by connector routing.
///
/// # Examples
///
/// ```
/// # use isograph_core::geometry::Point3;
/// let a = Point3::new(1.0, 2.0, 3.0);
/// let b = Point3::new(3.0, 2.0, 1.0);
///
/// let mid = a.midpoint(b);
/// assert_eq!(mid, Point3::new(2.0, 2.0, 2.0));
///
/// let offset = b.sub_point(a);
/// assert_eq!(offset.x(), 2.0);
/// assert_eq!(offset.z(), -2.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> f32 {
        self.z
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Creates a new point with the specified z-coordinate
    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    /// Returns the coordinate along the given axis
    pub fn component(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Creates a new point with the coordinate along `axis` replaced
    pub fn with_component(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::X => self.with_x(value),
            Axis::Y => self.with_y(value),
            Axis::Z => self.with_z(value),
        }
    }

    /// Checks if all coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Checks if all coordinates are finite numbers
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point3) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point3) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Multiplies all coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// Returns a new point with absolute values of all coordinates
    pub fn abs(self) -> Self {
        Self {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point3) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }

    /// Linearly interpolates toward `other`.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use isograph_core::geometry::Point3;
    /// let a = Point3::new(0.0, 0.0, 0.0);
    /// let b = Point3::new(8.0, 4.0, -4.0);
    ///
    /// assert_eq!(a.lerp(b, 0.25), Point3::new(2.0, 1.0, -1.0));
    /// ```
    pub fn lerp(self, other: Point3, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Euclidean length of this vector
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point3) -> f32 {
        other.sub_point(self).length()
    }

    /// Length of the projection onto the horizontal (X/Z) plane
    pub fn horizontal_length(self) -> f32 {
        self.x.hypot(self.z)
    }

    /// Returns the projection onto the horizontal (X/Z) plane
    pub fn horizontal(self) -> Self {
        Self {
            x: self.x,
            y: 0.0,
            z: self.z,
        }
    }

    /// Returns a unit vector in the same direction.
    ///
    /// Vectors whose length is zero (or not a normal float) normalize to
    /// the zero vector instead of producing NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// # use isograph_core::geometry::Point3;
    /// let v = Point3::new(0.0, 0.0, -5.0).normalize_or_zero();
    /// assert_eq!(v, Point3::new(0.0, 0.0, -1.0));
    ///
    /// assert!(Point3::default().normalize_or_zero().is_zero());
    /// ```
    pub fn normalize_or_zero(self) -> Self {
        let length = self.length();
        if length.is_normal() {
            self.scale(1.0 / length)
        } else {
            Self::default()
        }
    }
}

impl From<[f32; 3]> for Point3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Dimensions of a 3D element: width (X), height (Y) and depth (Z)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size3 {
    width: f32,
    height: f32,
    depth: f32,
}

impl Size3 {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the width (X extent)
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height (Y extent)
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the depth (Z extent)
    pub fn depth(self) -> f32 {
        self.depth
    }

    /// Returns half of each dimension as a vector
    pub fn half_extents(self) -> Point3 {
        Point3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0)
    }

    /// Multiplies all dimensions by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            depth: self.depth * factor,
        }
    }
}

/// An axis-aligned bounding box with minimum and maximum corners
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds3 {
    min: Point3,
    max: Point3,
}

impl Bounds3 {
    /// Creates bounds spanning two corners.
    ///
    /// The corners may be given in any order; each coordinate is sorted
    /// so that `min <= max` holds on every axis.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates bounds from a center point and a size
    pub fn new_from_center(center: Point3, size: Size3) -> Self {
        let half = size.half_extents();
        Self::new(center.sub_point(half), center.add_point(half))
    }

    /// Returns the minimum corner
    pub fn min(self) -> Point3 {
        self.min
    }

    /// Returns the maximum corner
    pub fn max(self) -> Point3 {
        self.max
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point3 {
        self.min.midpoint(self.max)
    }

    /// Returns the face coordinate along `axis` on the side given by `positive`
    pub fn face(self, axis: Axis, positive: bool) -> f32 {
        if positive {
            self.max.component(axis)
        } else {
            self.min.component(axis)
        }
    }

    /// Moves the bounds by the specified offset
    pub fn translate(self, offset: Point3) -> Self {
        Self {
            min: self.min.add_point(offset),
            max: self.max.add_point(offset),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point3> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, -1000.0f32..1000.0)
            .prop_map(|(x, y, z)| Point3::new(x, y, z))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds3> {
        (point_strategy(), point_strategy()).prop_map(|(a, b)| Bounds3::new(a, b))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Normalized non-zero vectors have unit length.
    fn check_normalize_has_unit_length(p: Point3) -> Result<(), TestCaseError> {
        prop_assume!(p.length() > 0.001);

        let unit = p.normalize_or_zero();
        prop_assert!(approx_eq!(f32, unit.length(), 1.0, epsilon = 0.0001));
        Ok(())
    }

    /// Lerp stays within the bounds spanned by both endpoints.
    fn check_lerp_stays_in_span(a: Point3, b: Point3, t: f32) -> Result<(), TestCaseError> {
        let span = Bounds3::new(a, b);
        let point = a.lerp(b, t);
        for axis in Axis::ALL {
            let value = point.component(axis);
            prop_assert!(value >= span.min().component(axis) - 0.001);
            prop_assert!(value <= span.max().component(axis) + 0.001);
        }
        Ok(())
    }

    /// Bounds corners are sorted on every axis, with the center between them.
    fn check_bounds_corners_sorted(bounds: Bounds3) -> Result<(), TestCaseError> {
        let center = bounds.center();
        for axis in Axis::ALL {
            prop_assert!(bounds.face(axis, false) <= bounds.face(axis, true));
            prop_assert!(center.component(axis) >= bounds.min().component(axis));
            prop_assert!(center.component(axis) <= bounds.max().component(axis));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn normalize_has_unit_length(p in point_strategy()) {
            check_normalize_has_unit_length(p)?;
        }

        #[test]
        fn lerp_stays_in_span(a in point_strategy(), b in point_strategy(), t in 0.0f32..=1.0) {
            check_lerp_stays_in_span(a, b, t)?;
        }

        #[test]
        fn bounds_corners_sorted(bounds in bounds_strategy()) {
            check_bounds_corners_sorted(bounds)?;
        }
    }
}
