//! Isometric SVG snapshots.
//!
//! Scenes are drawn in a 2:1 isometric projection: world X runs down-right,
//! world Z down-left and world Y straight up. The projection is affine, so
//! a connector's Bézier control points project to the control points of the
//! projected curve and connectors are emitted as exact SVG cubic paths.
//!
//! Elements are painted back to front, then connectors, arrowheads and flow
//! particles. Hidden connectors (see
//! [`Scene::set_connections_visible`](crate::scene::Scene::set_connections_visible))
//! are left out along with their particles.

mod connector;
mod element;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use isograph_core::{color::Color, geometry::Point3};

use crate::{
    config::StyleConfig,
    export::{self, Exporter},
    scene::Scene,
};

use element::Palette;

/// Screen units per world unit unless overridden
pub const DEFAULT_SCALE: f32 = 40.0;

/// Empty space around the drawing, in screen units
const MARGIN: f32 = 40.0;

/// A projected point in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScreenPoint {
    x: f32,
    y: f32,
}

/// Axis-aligned screen-space extent of everything drawn.
#[derive(Debug, Clone, Copy, Default)]
struct ScreenBounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl ScreenBounds {
    /// Returns the extent of `points`, or zero bounds at the origin when
    /// there are none.
    fn from_points(points: &[ScreenPoint]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };
        let start = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        rest.iter().fold(start, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        })
    }

    fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

/// Builder for [`Svg`] exporters.
///
/// # Examples
///
/// ```
/// use isograph::export::svg::SvgBuilder;
///
/// let exporter = SvgBuilder::new().with_scale(32.0).build();
/// assert!(exporter.is_ok());
///
/// assert!(SvgBuilder::new().with_scale(0.0).build().is_err());
/// ```
#[derive(Debug, Default)]
pub struct SvgBuilder {
    style: StyleConfig,
    scale: Option<f32>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the background color of `style`
    pub fn with_style(mut self, style: &StyleConfig) -> Self {
        self.style = style.clone();
        self
    }

    /// Sets the number of screen units per world unit
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Validates the settings and creates the exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] for an unparsable background color
    /// or a scale that is not a positive finite number.
    pub fn build(self) -> Result<Svg, export::Error> {
        let background = self
            .style
            .background_color()
            .map_err(export::Error::Render)?;

        let scale = self.scale.unwrap_or(DEFAULT_SCALE);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(export::Error::Render(format!(
                "scale must be a positive number, got {scale}"
            )));
        }

        Ok(Svg {
            background,
            scale,
            palette: Palette::new()?,
        })
    }
}

/// SVG exporter for scene snapshots.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
    scale: f32,
    palette: Palette,
}

impl Svg {
    /// Renders the current state of `scene` to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] if any drawn coordinate is not
    /// finite.
    pub fn render_scene(&self, scene: &Scene) -> Result<Document, export::Error> {
        let points = self.scene_points(scene);
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(export::Error::Render(
                "scene contains non-finite coordinates".to_string(),
            ));
        }
        let bounds = ScreenBounds::from_points(&points);

        let width = MARGIN.mul_add(2.0, bounds.width());
        let height = MARGIN.mul_add(2.0, bounds.height());
        debug!(width = width, height = height; "SVG dimensions");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background)
                .set("fill-opacity", background.alpha());
            doc = doc.add(rect);
        }

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                MARGIN - bounds.min_x,
                MARGIN - bounds.min_y
            ),
        );

        main_group = main_group.add(self.render_elements(scene.elements()));

        let registry = scene.registry();
        if registry.is_visible() {
            main_group = main_group
                .add(self.render_connections(registry))
                .add(self.render_particles(registry));
        }

        info!(
            elements = scene.elements().len(),
            connections = registry.len(),
            visible = registry.is_visible();
            "Scene rendered"
        );
        Ok(doc.add(main_group))
    }

    fn project(&self, point: Point3) -> ScreenPoint {
        ScreenPoint {
            x: (point.x() - point.z()) * self.scale,
            y: ((point.x() + point.z()) * 0.5 - point.y()) * self.scale,
        }
    }

    /// Collects the projected corners of every element and the control
    /// points of every visible connector. The drawing lies inside their
    /// extent.
    fn scene_points(&self, scene: &Scene) -> Vec<ScreenPoint> {
        let mut points = Vec::new();

        for element in scene.elements().iter() {
            let world = element.world_bounds();
            let (min, max) = (world.min(), world.max());
            for x in [min.x(), max.x()] {
                for y in [min.y(), max.y()] {
                    for z in [min.z(), max.z()] {
                        points.push(self.project(Point3::new(x, y, z)));
                    }
                }
            }
        }

        let registry = scene.registry();
        if registry.is_visible() {
            for connection in registry.iter() {
                let curve = connection.curve();
                points.extend(curve.control_points().map(|p| self.project(p)));
            }
        }

        points
    }
}

impl Exporter for Svg {
    fn export_scene(&self, scene: &Scene) -> Result<String, export::Error> {
        let doc = self.render_scene(scene)?;
        debug!("SVG document rendered");
        Ok(doc.to_string())
    }
}

/// Formats screen points for a `points` attribute
fn points_attribute(points: &[ScreenPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
