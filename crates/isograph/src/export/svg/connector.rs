//! SVG rendering of connectors, arrowheads and flow particles.

use svg::node::element as svg_element;

use isograph_core::{
    color::Color,
    draw::{Arrowhead, RenderMode},
};

use super::{ScreenPoint, Svg, points_attribute};
use crate::registry::{Connection, ConnectionRegistry};

/// Stroke width of `Line` connectors, in screen units
const LINE_STROKE_WIDTH: f32 = 1.5;

/// Thinnest stroke drawn for a tube, in screen units
const MIN_TUBE_WIDTH: f32 = 1.0;

/// Arrowhead length along the curve, in world units
const ARROWHEAD_LENGTH: f32 = 0.3;

/// Arrowhead half-width relative to its projected length
const ARROWHEAD_SPREAD: f32 = 0.5;

/// Flow particle radius, in world units
const PARTICLE_RADIUS: f32 = 0.08;

const PARTICLE_HIGHLIGHT: f32 = 1.4;

impl Svg {
    pub(super) fn render_connections(&self, registry: &ConnectionRegistry) -> svg_element::Group {
        registry
            .iter()
            .fold(svg_element::Group::new(), |group, connection| {
                group.add(self.render_connection(connection))
            })
    }

    fn render_connection(&self, connection: &Connection) -> svg_element::Group {
        let style = connection.style();
        let visual = connection.visual();
        let [start, control1, control2, end] =
            connection.curve().control_points().map(|p| self.project(p));

        let path_data = format!(
            "M {} {} C {} {}, {} {}, {} {}",
            start.x, start.y, control1.x, control1.y, control2.x, control2.y, end.x, end.y
        );

        let width = match visual.render_mode() {
            RenderMode::Tube => (visual.tube_radius() * 2.0 * self.scale).max(MIN_TUBE_WIDTH),
            RenderMode::Line => LINE_STROKE_WIDTH,
        };

        let path = svg_element::Path::new()
            .set("d", path_data)
            .set("fill", "none")
            .set("stroke", &style.color())
            .set("stroke-opacity", style.opacity())
            .set("stroke-width", width)
            .set("stroke-linecap", "round");

        let group = svg_element::Group::new()
            .set("data-connection", connection.id().to_string())
            .add(path);

        match visual
            .arrowhead()
            .and_then(|head| self.render_arrowhead(head, style.color(), style.opacity()))
        {
            Some(head) => group.add(head),
            None => group,
        }
    }

    /// Draws a filled triangle with its tip on the curve end.
    ///
    /// Returns `None` when the direction is zero or points straight at the
    /// viewer, leaving nothing visible to draw.
    fn render_arrowhead(
        &self,
        head: &Arrowhead,
        color: Color,
        opacity: f32,
    ) -> Option<svg_element::Polygon> {
        if head.direction().is_zero() {
            return None;
        }

        let tip = self.project(head.tip());
        let base = self.project(head.base(ARROWHEAD_LENGTH));
        let (dx, dy) = (tip.x - base.x, tip.y - base.y);
        let length = dx.hypot(dy);
        if length <= f32::EPSILON {
            return None;
        }

        let spread = ARROWHEAD_SPREAD * length;
        let (nx, ny) = (-dy / length * spread, dx / length * spread);
        let corners = [
            tip,
            ScreenPoint {
                x: base.x + nx,
                y: base.y + ny,
            },
            ScreenPoint {
                x: base.x - nx,
                y: base.y - ny,
            },
        ];

        Some(
            svg_element::Polygon::new()
                .set("points", points_attribute(&corners))
                .set("fill", &color)
                .set("fill-opacity", opacity),
        )
    }

    /// Draws the particle of every connection at its current position.
    pub(super) fn render_particles(&self, registry: &ConnectionRegistry) -> svg_element::Group {
        let mut group = svg_element::Group::new();

        for particle in registry.particles() {
            let Some(connection) = registry.get(particle.connection()) else {
                continue;
            };
            let at = self.project(particle.position());
            let circle = svg_element::Circle::new()
                .set("cx", at.x)
                .set("cy", at.y)
                .set("r", PARTICLE_RADIUS * self.scale)
                .set("fill", &connection.style().color().shade(PARTICLE_HIGHLIGHT));
            group = group.add(circle);
        }

        group
    }
}
