//! Visual definitions for connectors and their overlays.
//!
//! - [`ConnectionStyle`]: color, routing and rendering options of a connector
//! - [`CurveType`]: the routing profile used to shape a connector
//! - [`RenderMode`]: how a renderer should draw the connector body
//! - [`Arrowhead`]: direction marker placed at the end of a connector

mod arrowhead;
mod connector;

pub use arrowhead::Arrowhead;
pub use connector::{ConnectionStyle, CurveType, RenderMode};
