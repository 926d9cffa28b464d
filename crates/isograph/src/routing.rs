//! Connector routing.
//!
//! Routing turns a pair of elements and a [`ConnectionStyle`] into the
//! [`CubicBezier`] a connector follows:
//!
//! - [`anchor`] resolves where on each element the connector attaches.
//! - [`curve`] shapes the control points for the chosen [`CurveType`].
//!
//! [`ConnectionStyle`]: isograph_core::draw::ConnectionStyle
//! [`CubicBezier`]: isograph_core::curve::CubicBezier
//! [`CurveType`]: isograph_core::draw::CurveType

pub mod anchor;
pub mod curve;

pub use anchor::{AXIS_TIE_EPSILON, AnchorResolver, resolve_connection_point};
pub use curve::{architectural_apex, build_curve};

use isograph_core::{curve::CubicBezier, draw::ConnectionStyle, element::Element};

/// Resolves both attachment points and builds the connector curve between
/// `source` and `target`.
pub fn route(
    resolver: &AnchorResolver,
    source: &Element,
    target: &Element,
    style: &ConnectionStyle,
) -> CubicBezier {
    let start = resolver.resolve(source, target);
    let end = resolver.resolve(target, source);
    build_curve(start, end, style)
}
