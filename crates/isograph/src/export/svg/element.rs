//! SVG rendering of scene elements.

use std::f32::consts::SQRT_2;

use svg::node::element as svg_element;

use isograph_core::{
    color::Color,
    element::{Element, ElementArena, ElementKind},
    geometry::{Bounds3, Point3},
};

use super::{ScreenPoint, Svg, points_attribute};
use crate::export;

/// Generic node marker radius, in world units
const NODE_RADIUS: f32 = 0.15;

const LABEL_FONT_SIZE: f32 = 12.0;

/// Shading of the three visible box faces
const TOP_SHADE: f32 = 1.0;
const FRONT_SHADE: f32 = 0.8;
const SIDE_SHADE: f32 = 0.65;

/// Fill colors per element family.
#[derive(Debug, Clone, Copy)]
pub(super) struct Palette {
    platform: Color,
    component: Color,
    database: Color,
    node: Color,
    label: Color,
}

impl Palette {
    pub(super) fn new() -> Result<Self, export::Error> {
        let parse = |value: &str| Color::new(value).map_err(export::Error::Render);
        Ok(Self {
            platform: parse("#37474f")?,
            component: parse("#607d8b")?,
            database: parse("#5c6bc0")?,
            node: parse("#b0bec5")?,
            label: parse("#eceff1")?,
        })
    }
}

impl Svg {
    /// Renders all elements, farthest from the viewer first.
    pub(super) fn render_elements(&self, elements: &ElementArena) -> svg_element::Group {
        let mut ordered: Vec<&Element> = elements.iter().collect();
        ordered.sort_by(|a, b| {
            let (a, b) = (depth_key(a), depth_key(b));
            a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
        });

        ordered
            .into_iter()
            .fold(svg_element::Group::new(), |group, element| {
                group.add(self.render_element(element))
            })
    }

    fn render_element(&self, element: &Element) -> svg_element::Group {
        let group = svg_element::Group::new().set("data-kind", element.kind().name());

        let group = match *element.kind() {
            ElementKind::Platform { .. } => {
                self.render_box(group, element.world_bounds(), self.palette.platform)
            }
            ElementKind::PlatformComponent { .. } | ElementKind::StandaloneComponent { .. } => {
                self.render_box(group, element.world_bounds(), self.palette.component)
            }
            ElementKind::DatabaseComponent { radius, height } => {
                self.render_cylinder(group, element.position(), radius, height)
            }
            ElementKind::GenericNode => {
                let center = self.project(element.position());
                group.add(
                    svg_element::Circle::new()
                        .set("cx", center.x)
                        .set("cy", center.y)
                        .set("r", NODE_RADIUS * self.scale)
                        .set("fill", &self.palette.node),
                )
            }
        };

        match element.label() {
            Some(label) => group.add(self.render_label(element, label)),
            None => group,
        }
    }

    /// Draws the top face and the two faces turned toward the viewer
    /// (+X and +Z).
    fn render_box(
        &self,
        group: svg_element::Group,
        bounds: Bounds3,
        color: Color,
    ) -> svg_element::Group {
        let (min, max) = (bounds.min(), bounds.max());
        let corner = |x: f32, y: f32, z: f32| self.project(Point3::new(x, y, z));

        let top = [
            corner(min.x(), max.y(), min.z()),
            corner(max.x(), max.y(), min.z()),
            corner(max.x(), max.y(), max.z()),
            corner(min.x(), max.y(), max.z()),
        ];
        let front = [
            corner(min.x(), min.y(), max.z()),
            corner(max.x(), min.y(), max.z()),
            corner(max.x(), max.y(), max.z()),
            corner(min.x(), max.y(), max.z()),
        ];
        let side = [
            corner(max.x(), min.y(), min.z()),
            corner(max.x(), min.y(), max.z()),
            corner(max.x(), max.y(), max.z()),
            corner(max.x(), max.y(), min.z()),
        ];

        group
            .add(face(&front, color.shade(FRONT_SHADE)))
            .add(face(&side, color.shade(SIDE_SHADE)))
            .add(face(&top, color.shade(TOP_SHADE)))
    }

    /// Draws an upright cylinder as bottom cap, body and top cap.
    ///
    /// A horizontal circle of radius `r` projects to an axis-aligned ellipse
    /// with semi-axes `r√2` and `r√2 / 2`.
    fn render_cylinder(
        &self,
        group: svg_element::Group,
        center: Point3,
        radius: f32,
        height: f32,
    ) -> svg_element::Group {
        let half = height.abs() / 2.0;
        let top = self.project(center.with_y(center.y() + half));
        let bottom = self.project(center.with_y(center.y() - half));
        let rx = radius.abs() * SQRT_2 * self.scale;
        let ry = rx / 2.0;
        let color = self.palette.database;

        let cap = |at: ScreenPoint, fill: Color| {
            svg_element::Ellipse::new()
                .set("cx", at.x)
                .set("cy", at.y)
                .set("rx", rx)
                .set("ry", ry)
                .set("fill", &fill)
        };
        let body = svg_element::Rectangle::new()
            .set("x", top.x - rx)
            .set("y", top.y)
            .set("width", rx * 2.0)
            .set("height", bottom.y - top.y)
            .set("fill", &color.shade(FRONT_SHADE));

        group
            .add(cap(bottom, color.shade(FRONT_SHADE)))
            .add(body)
            .add(cap(top, color.shade(TOP_SHADE)))
    }

    /// Places the label just above the top of the element.
    fn render_label(&self, element: &Element, label: &str) -> svg_element::Text {
        let bounds = element.world_bounds();
        let anchor = self.project(bounds.center().with_y(bounds.max().y()));

        svg_element::Text::new(label)
            .set("x", anchor.x)
            .set("y", anchor.y - LABEL_FONT_SIZE)
            .set("text-anchor", "middle")
            .set("font-family", "sans-serif")
            .set("font-size", LABEL_FONT_SIZE)
            .set("fill", &self.palette.label)
    }
}

/// Painter's order: smaller `x + z` is farther from the viewer, then lower
/// elements first.
fn depth_key(element: &Element) -> (f32, f32) {
    let center = element.world_bounds().center();
    (center.x() + center.z(), center.y())
}

fn face(points: &[ScreenPoint], fill: Color) -> svg_element::Polygon {
    svg_element::Polygon::new()
        .set("points", points_attribute(points))
        .set("fill", &fill)
        .set("fill-opacity", fill.alpha())
}

#[cfg(test)]
mod tests {
    use isograph_core::geometry::Size3;

    use super::*;
    use crate::export::svg::SvgBuilder;

    #[test]
    fn test_depth_order() {
        let mut arena = ElementArena::new();
        let near = arena.insert(ElementKind::GenericNode, Point3::new(5.0, 0.0, 5.0));
        let far = arena.insert(ElementKind::GenericNode, Point3::new(-5.0, 0.0, -5.0));

        let near_key = depth_key(arena.get(near).unwrap());
        let far_key = depth_key(arena.get(far).unwrap());
        assert!(far_key.0 < near_key.0);
    }

    #[test]
    fn test_box_has_three_faces() {
        let svg = SvgBuilder::new().build().unwrap();
        let mut arena = ElementArena::new();
        arena.insert(
            ElementKind::Platform {
                size: Size3::new(4.0, 0.4, 2.0),
            },
            Point3::default(),
        );

        let rendered = svg.render_elements(&arena).to_string();
        assert_eq!(rendered.matches("<polygon").count(), 3);
    }

    #[test]
    fn test_label_rendered() {
        let svg = SvgBuilder::new().build().unwrap();
        let mut arena = ElementArena::new();
        let id = arena.insert(ElementKind::GenericNode, Point3::default());
        arena.get_mut(id).unwrap().set_label("Gateway");

        let rendered = svg.render_elements(&arena).to_string();
        assert!(rendered.contains("Gateway"));
    }
}
