//! Connector curve construction.
//!
//! Every profile produces a [`CubicBezier`] whose first and last points are
//! exactly the two attachment points. Control points never sit below the
//! lower endpoint, so no profile dips under the elements it connects.
//!
//! # Profiles
//!
//! - **Architectural**: rises to an apex above the taller endpoint. The rise
//!   is the larger of the vertical offset and 30% of the height difference,
//!   so connectors between tiers clear the upper one.
//! - **Smooth**: control points a `curvature` fraction along the chord,
//!   lifted by the vertical offset and pushed sideways by the horizontal
//!   offset. Parallel connectors between the same elements can be separated
//!   with different horizontal offsets.
//! - **Sharp**: control points at 30% and 70% of the chord, lifted by the
//!   vertical offset.

use log::trace;

use isograph_core::{
    curve::CubicBezier,
    draw::{ConnectionStyle, CurveType},
    geometry::Point3,
};

/// Fraction of the endpoint height difference the architectural apex always
/// clears.
pub const ARCHITECTURAL_RISE: f32 = 0.3;

/// How far architectural control points travel toward the apex, horizontally.
const ARCHITECTURAL_REACH: f32 = 0.6;

/// Height of architectural control points, as a fraction of the rise.
const ARCHITECTURAL_LIFT: f32 = 0.7;

const SHARP_NEAR: f32 = 0.3;
const SHARP_FAR: f32 = 0.7;

/// Builds the connector curve from `start` to `end` for the given style.
///
/// # Examples
///
/// ```
/// use isograph::routing::build_curve;
/// use isograph_core::{draw::ConnectionStyle, geometry::Point3};
///
/// let start = Point3::new(-6.0, 0.25, 4.0);
/// let end = Point3::new(-6.0, 0.25, 2.5);
/// let curve = build_curve(start, end, &ConnectionStyle::default());
///
/// assert_eq!(curve.start(), start);
/// assert_eq!(curve.end(), end);
/// assert!(curve.sample_at(0.5).y() > 0.25);
/// ```
pub fn build_curve(start: Point3, end: Point3, style: &ConnectionStyle) -> CubicBezier {
    let curve = match style.curve_type() {
        CurveType::Architectural => architectural(start, end, style.vertical_offset()),
        CurveType::Smooth => smooth(start, end, style),
        CurveType::Sharp => sharp(start, end, style.vertical_offset()),
    };

    trace!(
        curve_type:% = style.curve_type(),
        start:? = start,
        end:? = end;
        "Built connector curve"
    );
    curve
}

/// Returns the routing apex of an architectural connector.
///
/// The apex sits at the horizontal midpoint of the endpoints, above the
/// taller endpoint by `max(vertical_offset, 0.3 * |Δy|)`. Negative offsets
/// count as zero.
///
/// # Examples
///
/// ```
/// use isograph::routing::architectural_apex;
/// use isograph_core::geometry::Point3;
///
/// let apex = architectural_apex(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(4.0, 10.0, 0.0),
///     0.5,
/// );
/// assert_eq!(apex, Point3::new(2.0, 13.0, 0.0));
/// ```
pub fn architectural_apex(start: Point3, end: Point3, vertical_offset: f32) -> Point3 {
    let rise = architectural_rise(start, end, vertical_offset);
    start
        .midpoint(end)
        .with_y(start.y().max(end.y()) + rise)
}

fn architectural_rise(start: Point3, end: Point3, vertical_offset: f32) -> f32 {
    let clearance = ARCHITECTURAL_RISE * (end.y() - start.y()).abs();
    vertical_offset.max(0.0).max(clearance)
}

fn architectural(start: Point3, end: Point3, vertical_offset: f32) -> CubicBezier {
    let rise = architectural_rise(start, end, vertical_offset);
    let apex = architectural_apex(start, end, vertical_offset);

    let control1 = start
        .lerp(apex, ARCHITECTURAL_REACH)
        .with_y(start.y() + ARCHITECTURAL_LIFT * rise);
    let control2 = end
        .lerp(apex, ARCHITECTURAL_REACH)
        .with_y(end.y() + ARCHITECTURAL_LIFT * rise);

    CubicBezier::new(start, control1, control2, end)
}

/// Curvature is clamped to `[0, 1]`; outside that range a control point
/// would overshoot an endpoint and could drop below both.
fn smooth(start: Point3, end: Point3, style: &ConnectionStyle) -> CubicBezier {
    let chord = end.sub_point(start);
    let reach = chord.scale(style.curvature().clamp(0.0, 1.0));
    let lateral = Point3::new(-chord.z(), 0.0, chord.x())
        .normalize_or_zero()
        .scale(style.horizontal_offset());
    let bend = lateral.add_point(lift(style.vertical_offset()));

    let control1 = start.add_point(reach).add_point(bend);
    let control2 = end.sub_point(reach).add_point(bend);

    CubicBezier::new(start, control1, control2, end)
}

fn sharp(start: Point3, end: Point3, vertical_offset: f32) -> CubicBezier {
    let lift = lift(vertical_offset);
    let control1 = start.lerp(end, SHARP_NEAR).add_point(lift);
    let control2 = start.lerp(end, SHARP_FAR).add_point(lift);

    CubicBezier::new(start, control1, control2, end)
}

fn lift(vertical_offset: f32) -> Point3 {
    Point3::new(0.0, vertical_offset.max(0.0), 0.0)
}
