//! Connection point resolution.
//!
//! Given an element and the point it should face, [`AnchorResolver`] picks
//! the point on the element's surface where a connector attaches. The rule
//! depends on the element kind:
//!
//! | Kind                  | Attachment |
//! |-----------------------|------------|
//! | `Platform`            | One of the four vertical side faces, just above the top |
//! | `DatabaseComponent`   | A cap center, or the side wall at the radius |
//! | `StandaloneComponent` | Center of a measured bounding-box face |
//! | `PlatformComponent`   | Nominal half-size offset from the position |
//! | `GenericNode`         | The position itself |
//!
//! # Dominance and ties
//!
//! Face selection compares the absolute offset toward the target along each
//! axis. Offsets within [`AXIS_TIE_EPSILON`] (relative to the largest offset)
//! count as equal, and equal axes resolve in the order X, Y, Z. A zero
//! offset on the winning axis picks its positive face. Both rules keep the
//! attachment point stable while elements float past each other.

use log::trace;

use isograph_core::{
    element::{Element, ElementKind},
    geometry::{Axis, Bounds3, Point3, Size3},
};

use crate::config::RoutingConfig;

/// Relative tolerance under which two axis offsets are treated as equal
pub const AXIS_TIE_EPSILON: f32 = 1e-5;

/// Resolves connector attachment points on element surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorResolver {
    platform_clearance: f32,
    component_half_size: f32,
}

impl Default for AnchorResolver {
    fn default() -> Self {
        Self::from(&RoutingConfig::default())
    }
}

impl From<&RoutingConfig> for AnchorResolver {
    fn from(config: &RoutingConfig) -> Self {
        Self::new(config.platform_clearance(), config.component_half_size())
    }
}

impl AnchorResolver {
    /// Creates a resolver.
    ///
    /// # Arguments
    ///
    /// * `platform_clearance` - Height above a platform's top face at which
    ///   connectors attach
    /// * `component_half_size` - Nominal half-size of components resting on
    ///   a platform
    pub fn new(platform_clearance: f32, component_half_size: f32) -> Self {
        Self {
            platform_clearance,
            component_half_size,
        }
    }

    /// Returns the attachment point on `element` facing the `facing` element.
    ///
    /// The facing element is aimed at through the center of its world
    /// bounds. For every kind except `StandaloneComponent` that is its
    /// position; a standalone's measured geometry may sit off its position.
    pub fn resolve(&self, element: &Element, facing: &Element) -> Point3 {
        self.resolve_towards(element, facing.world_bounds().center())
    }

    /// Returns the attachment point on `element` facing `target`.
    pub fn resolve_towards(&self, element: &Element, target: Point3) -> Point3 {
        let position = element.position();
        let point = match *element.kind() {
            ElementKind::Platform { size } => self.platform_point(position, size, target),
            ElementKind::DatabaseComponent { radius, height } => {
                cylinder_point(position, radius, height, target)
            }
            ElementKind::StandaloneComponent { .. } => {
                standalone_point(element.world_bounds(), target)
            }
            ElementKind::PlatformComponent { .. } => self.component_point(position, target),
            ElementKind::GenericNode => position,
        };

        trace!(
            element_id = element.id().index(),
            kind = element.kind().name(),
            point:? = point;
            "Resolved connection point"
        );
        point
    }

    /// Attaches to the side face of the platform that faces the target.
    ///
    /// Only X and Z compete; the point slides along the chosen face toward
    /// the target so that several connectors fan out along the edge.
    fn platform_point(&self, center: Point3, size: Size3, target: Point3) -> Point3 {
        let delta = target.sub_point(center);
        let half = size.half_extents().abs();
        let y = center.y() + half.y() + self.platform_clearance;

        match dominant_axis(delta, &[Axis::X, Axis::Z]) {
            Axis::X => Point3::new(
                center.x() + signed(half.x(), delta.x()),
                y,
                clamp_to_span(target.z(), center.z(), half.z()),
            ),
            _ => Point3::new(
                clamp_to_span(target.x(), center.x(), half.x()),
                y,
                center.z() + signed(half.z(), delta.z()),
            ),
        }
    }

    /// Offsets from the component position by the nominal half-size along
    /// the dominant axis.
    fn component_point(&self, position: Point3, target: Point3) -> Point3 {
        let delta = target.sub_point(position);
        let axis = dominant_axis(delta, &Axis::ALL);
        let offset = signed(self.component_half_size, delta.component(axis));

        position.with_component(axis, position.component(axis) + offset)
    }
}

/// Returns the attachment point on `element` facing `facing`, using the
/// default routing constants.
///
/// # Examples
///
/// ```
/// use isograph::routing::resolve_connection_point;
/// use isograph_core::element::{ElementArena, ElementKind};
/// use isograph_core::geometry::{Point3, Size3};
///
/// let mut arena = ElementArena::new();
/// let platform = arena.insert(
///     ElementKind::Platform { size: Size3::new(8.0, 0.4, 4.0) },
///     Point3::new(-6.0, 0.0, 6.0),
/// );
/// let node = arena.insert(ElementKind::GenericNode, Point3::new(-6.0, 0.0, 1.0));
///
/// let point = resolve_connection_point(
///     arena.get(platform).unwrap(),
///     arena.get(node).unwrap(),
/// );
/// assert_eq!(point.z(), 4.0);
/// ```
pub fn resolve_connection_point(element: &Element, facing: &Element) -> Point3 {
    AnchorResolver::default().resolve(element, facing)
}

/// Attaches to a cap center when the target is mostly above or below,
/// otherwise to the side wall in the horizontal direction of the target.
fn cylinder_point(center: Point3, radius: f32, height: f32, target: Point3) -> Point3 {
    let delta = target.sub_point(center);
    let horizontal = delta.horizontal_length();

    if horizontal <= f32::EPSILON || delta.y().abs() > horizontal {
        let cap = signed(height.abs() / 2.0, delta.y());
        return center.with_y(center.y() + cap);
    }

    center.add_point(delta.horizontal().scale(radius / horizontal))
}

/// Attaches to the center of the bounding-box face crossed first toward the
/// target. The two non-dominant coordinates are the exact box center.
fn standalone_point(bounds: Bounds3, target: Point3) -> Point3 {
    let center = bounds.center();
    let delta = target.sub_point(center);
    let axis = dominant_axis(delta, &Axis::ALL);
    let positive = delta.component(axis) >= 0.0;

    center.with_component(axis, bounds.face(axis, positive))
}

/// Picks the axis with the largest absolute offset, honoring the order of
/// `axes` for ties.
fn dominant_axis(delta: Point3, axes: &[Axis]) -> Axis {
    let magnitude = delta.abs();
    let largest = axes
        .iter()
        .map(|&axis| magnitude.component(axis))
        .fold(0.0f32, f32::max);
    let threshold = largest - AXIS_TIE_EPSILON * largest.max(1.0);

    axes.iter()
        .copied()
        .find(|&axis| magnitude.component(axis) >= threshold)
        .unwrap_or(Axis::X)
}

/// Returns `magnitude` with the sign of `direction`; zero counts as positive.
fn signed(magnitude: f32, direction: f32) -> f32 {
    if direction >= 0.0 {
        magnitude
    } else {
        -magnitude
    }
}

fn clamp_to_span(value: f32, center: f32, half: f32) -> f32 {
    value.max(center - half).min(center + half)
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use isograph_core::element::ElementArena;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn point_strategy() -> impl Strategy<Value = Point3> {
        (-50.0f32..50.0, -10.0f32..10.0, -50.0f32..50.0).prop_map(|(x, y, z)| Point3::new(x, y, z))
    }

    fn size_strategy() -> impl Strategy<Value = Size3> {
        (0.5f32..12.0, 0.1f32..1.0, 0.5f32..12.0).prop_map(|(w, h, d)| Size3::new(w, h, d))
    }

    fn geometry_strategy() -> impl Strategy<Value = Bounds3> {
        (point_strategy(), point_strategy()).prop_map(|(a, b)| {
            Bounds3::new(a.scale(0.05), b.scale(0.05))
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Platform points lie on one of the four vertical side faces.
    fn check_platform_point_on_side_face(
        center: Point3,
        size: Size3,
        target: Point3,
    ) -> Result<(), TestCaseError> {
        let mut arena = ElementArena::new();
        let id = arena.insert(ElementKind::Platform { size }, center);
        let resolver = AnchorResolver::default();
        let point = resolver.resolve_towards(arena.get(id).unwrap(), target);

        let half = size.half_extents();
        let on_x_face = approx_eq!(f32, (point.x() - center.x()).abs(), half.x(), epsilon = 1e-4)
            && (point.z() - center.z()).abs() <= half.z() + 1e-4;
        let on_z_face = approx_eq!(f32, (point.z() - center.z()).abs(), half.z(), epsilon = 1e-4)
            && (point.x() - center.x()).abs() <= half.x() + 1e-4;

        prop_assert!(on_x_face || on_z_face, "point {point:?} not on a side face");
        prop_assert!(approx_eq!(
            f32,
            point.y(),
            center.y() + half.y() + 0.05,
            epsilon = 1e-4
        ));
        Ok(())
    }

    /// Standalone points keep the two non-dominant coordinates at the
    /// bounds center and sit on the dominant face.
    fn check_standalone_point_at_face_center(
        geometry: Bounds3,
        position: Point3,
        target: Point3,
    ) -> Result<(), TestCaseError> {
        let mut arena = ElementArena::new();
        let id = arena.insert(ElementKind::StandaloneComponent { geometry }, position);
        let element = arena.get(id).unwrap();
        let bounds = element.world_bounds();
        let center = bounds.center();

        let point = AnchorResolver::default().resolve_towards(element, target);

        let on_face: Vec<Axis> = Axis::ALL
            .iter()
            .copied()
            .filter(|&axis| point.component(axis) != center.component(axis))
            .collect();
        prop_assert!(on_face.len() <= 1, "more than one coordinate moved: {point:?}");
        if let Some(&axis) = on_face.first() {
            let value = point.component(axis);
            prop_assert!(value == bounds.min().component(axis) || value == bounds.max().component(axis));
        }
        Ok(())
    }

    /// Cylinder side points are exactly one radius from the axis.
    fn check_cylinder_side_distance(target: Point3) -> Result<(), TestCaseError> {
        let mut arena = ElementArena::new();
        let id = arena.insert(
            ElementKind::DatabaseComponent {
                radius: 0.9,
                height: 1.2,
            },
            Point3::default(),
        );
        let point = AnchorResolver::default().resolve_towards(arena.get(id).unwrap(), target);

        if approx_eq!(f32, point.y(), 0.0) {
            prop_assert!(approx_eq!(f32, point.horizontal_length(), 0.9, epsilon = 1e-4));
        } else {
            prop_assert!(approx_eq!(f32, point.y().abs(), 0.6));
            prop_assert!(point.horizontal_length() == 0.0);
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn platform_point_on_side_face(
            center in point_strategy(),
            size in size_strategy(),
            target in point_strategy(),
        ) {
            check_platform_point_on_side_face(center, size, target)?;
        }

        #[test]
        fn standalone_point_at_face_center(
            geometry in geometry_strategy(),
            position in point_strategy(),
            target in point_strategy(),
        ) {
            check_standalone_point_at_face_center(geometry, position, target)?;
        }

        #[test]
        fn cylinder_side_distance(target in point_strategy()) {
            check_cylinder_side_distance(target)?;
        }
    }
}
