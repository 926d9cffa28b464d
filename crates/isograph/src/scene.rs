//! Scenes: named elements plus the connectors between them.
//!
//! A [`Scene`] is what a host application (or the CLI) holds. It owns the
//! [`ElementArena`], a name index used by scene descriptions, and the
//! [`ConnectionRegistry`]. All connector operations go through the scene so
//! that element lookups and rerouting stay consistent.
//!
//! [`SceneDescription`] is the serde model of a scene file:
//!
//! ```toml
//! [[element]]
//! name = "web"
//! kind = "platform"
//! position = [-6.0, 0.0, 6.0]
//! size = [8.0, 0.4, 4.0]
//!
//! [[element]]
//! name = "db"
//! kind = "database"
//! position = [2.0, 0.0, -4.0]
//! radius = 0.9
//! height = 1.2
//!
//! [[connection]]
//! from = "web"
//! to = "db"
//! curve = "smooth"
//! arrowhead = true
//! ```

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::Deserialize;

use isograph_core::{
    color::Color,
    draw::{ConnectionStyle, CurveType, RenderMode},
    element::{Element, ElementArena, ElementId, ElementKind},
    geometry::{Bounds3, Point3, Size3},
};

use crate::{
    config::AppConfig,
    error::IsographError,
    registry::{ConnectionId, ConnectionRegistry},
};

/// Named elements and their connectors.
#[derive(Debug)]
pub struct Scene {
    elements: ElementArena,
    names: IndexMap<String, ElementId>,
    registry: ConnectionRegistry,
    connection_color: Option<Color>,
}

impl Scene {
    /// Creates an empty scene.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::Config`] for an invalid animation or style
    /// configuration.
    pub fn new(config: &AppConfig) -> Result<Self, IsographError> {
        let connection_color = config
            .style()
            .connection_color()
            .map_err(IsographError::Config)?;

        Ok(Self {
            elements: ElementArena::new(),
            names: IndexMap::new(),
            registry: ConnectionRegistry::new(config)?,
            connection_color,
        })
    }

    /// Builds a scene from a parsed description.
    ///
    /// Elements are added in file order, then connections. Connection styles
    /// without a color use the configured default connector color.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate or unknown element names, missing size
    /// data, or unparsable style values.
    pub fn from_description(
        description: &SceneDescription,
        config: &AppConfig,
    ) -> Result<Self, IsographError> {
        let mut scene = Self::new(config)?;

        for element in &description.elements {
            let kind = element.kind()?;
            let id = scene.add_element(&element.name, kind, Point3::from(element.position))?;
            if let Some(target) = scene.elements.get_mut(id) {
                if let Some(label) = &element.label {
                    target.set_label(label.as_str());
                }
                if let Some(layer) = &element.layer {
                    target.set_layer(layer.as_str());
                }
            }
        }

        for connection in &description.connections {
            let style = connection.style(scene.connection_color)?;
            scene.connect(&connection.from, &connection.to, style)?;
        }

        info!(
            elements = scene.elements.len(),
            connections = scene.registry.len();
            "Scene built"
        );
        Ok(scene)
    }

    /// Adds a named element.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::DuplicateElement`] if the name is taken.
    pub fn add_element(
        &mut self,
        name: &str,
        kind: ElementKind,
        position: Point3,
    ) -> Result<ElementId, IsographError> {
        if self.names.contains_key(name) {
            return Err(IsographError::DuplicateElement(name.to_string()));
        }

        let id = self.elements.insert(kind, position);
        self.names.insert(name.to_string(), id);
        debug!(name = name, element_id:% = id; "Element added");
        Ok(id)
    }

    /// Connects two named elements.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::UnknownElement`] if either name is not in the
    /// scene. Nothing is registered in that case.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        style: ConnectionStyle,
    ) -> Result<ConnectionId, IsographError> {
        let source = lookup(&self.names, &self.elements, from)?;
        let target = lookup(&self.names, &self.elements, to)?;
        Ok(self.registry.add(source, target, style))
    }

    /// Removes a connector. Returns false if `id` is unknown.
    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        self.registry.remove(id)
    }

    /// Moves an element and reroutes every connector attached to it.
    ///
    /// Returns the number of rerouted connectors.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::UnknownElement`] if `id` is not in the scene.
    pub fn move_element(
        &mut self,
        id: ElementId,
        position: Point3,
    ) -> Result<usize, IsographError> {
        let element = self
            .elements
            .get_mut(id)
            .ok_or_else(|| IsographError::UnknownElement(id.to_string()))?;
        element.set_position(position);

        let touching = self.registry.connections_touching(id);
        for connection_id in &touching {
            let Some(connection) = self.registry.get(*connection_id) else {
                continue;
            };
            let (source, target) = (connection.source(), connection.target());
            if let (Some(source), Some(target)) =
                (self.elements.get(source), self.elements.get(target))
            {
                self.registry.reroute(*connection_id, source, target);
            }
        }

        debug!(element_id:% = id, rerouted = touching.len(); "Element moved");
        Ok(touching.len())
    }

    /// Advances all flow particles by one frame
    pub fn tick(&mut self) {
        self.registry.tick();
    }

    /// Shows or hides all connectors
    pub fn set_connections_visible(&mut self, visible: bool) {
        self.registry.set_visible(visible);
    }

    /// Removes every connector, keeping the elements
    pub fn clear_connections(&mut self) {
        self.registry.clear();
    }

    /// Returns an element by handle
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Returns the handle of a named element
    pub fn element_id(&self, name: &str) -> Option<ElementId> {
        self.names.get(name).copied()
    }

    /// Returns the name an element was added under
    pub fn element_name(&self, id: ElementId) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, candidate)| **candidate == id)
            .map(|(name, _)| name.as_str())
    }

    pub fn elements(&self) -> &ElementArena {
        &self.elements
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }
}

fn lookup<'a>(
    names: &IndexMap<String, ElementId>,
    elements: &'a ElementArena,
    name: &str,
) -> Result<&'a Element, IsographError> {
    names
        .get(name)
        .and_then(|&id| elements.get(id))
        .ok_or_else(|| IsographError::UnknownElement(name.to_string()))
}

/// Serde model of a scene file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneDescription {
    #[serde(default, rename = "element")]
    elements: Vec<ElementDescription>,

    #[serde(default, rename = "connection")]
    connections: Vec<ConnectionDescription>,
}

impl SceneDescription {
    pub fn elements(&self) -> &[ElementDescription] {
        &self.elements
    }

    pub fn connections(&self) -> &[ConnectionDescription] {
        &self.connections
    }
}

/// One `[[element]]` table.
///
/// Which size fields are required depends on `kind`:
///
/// - `platform`, `component`: `size`
/// - `database`: `radius` and `height`
/// - `standalone`: `geometry_min` and `geometry_max`, or `size`
/// - `node`: none
#[derive(Debug, Clone, Deserialize)]
pub struct ElementDescription {
    name: String,
    kind: String,
    #[serde(default)]
    position: [f32; 3],
    size: Option<[f32; 3]>,
    radius: Option<f32>,
    height: Option<f32>,
    geometry_min: Option<[f32; 3]>,
    geometry_max: Option<[f32; 3]>,
    label: Option<String>,
    layer: Option<String>,
}

impl ElementDescription {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts the kind name and size fields into an [`ElementKind`].
    ///
    /// Unrecognized kind names become [`ElementKind::GenericNode`].
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::InvalidElement`] when the size data the kind
    /// needs is missing.
    pub fn kind(&self) -> Result<ElementKind, IsographError> {
        let kind = match self.kind.as_str() {
            "platform" => ElementKind::Platform {
                size: self.required_size()?,
            },
            "component" => ElementKind::PlatformComponent {
                size: self.required_size()?,
            },
            "database" => match (self.radius, self.height) {
                (Some(radius), Some(height)) => ElementKind::DatabaseComponent { radius, height },
                _ => return Err(self.missing("`radius` and `height`")),
            },
            "standalone" => {
                let geometry = match (self.geometry_min, self.geometry_max, self.size) {
                    (Some(min), Some(max), _) => Bounds3::new(min.into(), max.into()),
                    (None, None, Some(size)) => Bounds3::new_from_center(
                        Point3::default(),
                        Size3::new(size[0], size[1], size[2]),
                    ),
                    _ => return Err(self.missing("`geometry_min` and `geometry_max`, or `size`")),
                };
                ElementKind::StandaloneComponent { geometry }
            }
            "node" => ElementKind::GenericNode,
            other => {
                warn!(name = self.name, kind = other; "Unknown element kind, treating as node");
                ElementKind::GenericNode
            }
        };
        Ok(kind)
    }

    fn required_size(&self) -> Result<Size3, IsographError> {
        self.size
            .map(|[width, height, depth]| Size3::new(width, height, depth))
            .ok_or_else(|| self.missing("`size`"))
    }

    fn missing(&self, fields: &str) -> IsographError {
        IsographError::InvalidElement(format!(
            "element `{}` of kind `{}` requires {fields}",
            self.name, self.kind
        ))
    }
}

/// One `[[connection]]` table. Unset fields keep the
/// [`ConnectionStyle`] defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDescription {
    from: String,
    to: String,
    curve: Option<String>,
    vertical_offset: Option<f32>,
    horizontal_offset: Option<f32>,
    curvature: Option<f32>,
    color: Option<String>,
    opacity: Option<f32>,
    mode: Option<String>,
    tube_radius: Option<f32>,
    arrowhead: Option<bool>,
    animated: Option<bool>,
}

impl ConnectionDescription {
    /// Name of the source element
    pub fn source(&self) -> &str {
        &self.from
    }

    /// Name of the target element
    pub fn target(&self) -> &str {
        &self.to
    }

    /// Builds the connection style, starting from the defaults and
    /// `default_color`.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::InvalidStyle`] for unparsable curve, mode or
    /// color values.
    pub fn style(&self, default_color: Option<Color>) -> Result<ConnectionStyle, IsographError> {
        let mut style = ConnectionStyle::default();

        if let Some(color) = default_color {
            style.set_color(color);
        }
        if let Some(color) = &self.color {
            let color = Color::new(color).map_err(|err| self.invalid(&err))?;
            style.set_color(color);
        }
        if let Some(curve) = &self.curve {
            let curve_type: CurveType = curve.parse().map_err(|err| self.invalid(err))?;
            style.set_curve_type(curve_type);
        }
        if let Some(mode) = &self.mode {
            let mode: RenderMode = mode.parse().map_err(|err| self.invalid(err))?;
            style.set_render_mode(mode);
        }
        if let Some(opacity) = self.opacity {
            style.set_opacity(opacity);
        }
        if let Some(offset) = self.vertical_offset {
            style.set_vertical_offset(offset);
        }
        if let Some(offset) = self.horizontal_offset {
            style.set_horizontal_offset(offset);
        }
        if let Some(curvature) = self.curvature {
            style.set_curvature(curvature);
        }
        if let Some(radius) = self.tube_radius {
            style.set_tube_radius(radius);
        }
        if let Some(arrowhead) = self.arrowhead {
            style.set_arrowhead(arrowhead);
        }
        if let Some(animated) = self.animated {
            style.set_animated(animated);
        }

        Ok(style)
    }

    fn invalid(&self, reason: &str) -> IsographError {
        IsographError::InvalidStyle(format!(
            "connection `{}` -> `{}`: {reason}",
            self.from, self.to
        ))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn seeded() -> AppConfig {
        let mut config = AppConfig::default();
        config.animation_mut().set_seed(Some(17));
        config
    }

    fn parse(source: &str) -> SceneDescription {
        toml::from_str(source).unwrap()
    }

    const TWO_PLATFORMS: &str = r#"
        [[element]]
        name = "p1"
        kind = "platform"
        position = [-6.0, 0.0, 6.0]
        size = [8.0, 0.4, 4.0]

        [[element]]
        name = "p2"
        kind = "platform"
        position = [-6.0, 0.0, 1.0]
        size = [6.0, 0.4, 3.0]
        label = "Backend"

        [[connection]]
        from = "p1"
        to = "p2"
    "#;

    #[test]
    fn test_from_description() {
        let scene = Scene::from_description(&parse(TWO_PLATFORMS), &seeded()).unwrap();

        assert_eq!(scene.elements().len(), 2);
        assert_eq!(scene.registry().len(), 1);

        let p2 = scene.element_id("p2").unwrap();
        assert_eq!(scene.element(p2).unwrap().label(), Some("Backend"));
        assert_eq!(scene.element_name(p2), Some("p2"));

        let connection = scene.registry().iter().next().unwrap();
        assert_eq!(connection.curve().start().z(), 4.0);
        assert_eq!(connection.curve().end().z(), 2.5);
    }

    #[test]
    fn test_duplicate_element() {
        let mut scene = Scene::new(&seeded()).unwrap();
        scene
            .add_element("a", ElementKind::GenericNode, Point3::default())
            .unwrap();

        let result = scene.add_element("a", ElementKind::GenericNode, Point3::default());
        assert!(matches!(result, Err(IsographError::DuplicateElement(name)) if name == "a"));
    }

    #[test]
    fn test_connect_unknown_element() {
        let mut scene = Scene::new(&seeded()).unwrap();
        scene
            .add_element("a", ElementKind::GenericNode, Point3::default())
            .unwrap();

        let result = scene.connect("a", "ghost", ConnectionStyle::default());
        assert!(matches!(result, Err(IsographError::UnknownElement(name)) if name == "ghost"));
        assert!(scene.registry().is_empty());
    }

    #[test]
    fn test_move_element_reroutes() {
        let mut scene = Scene::from_description(&parse(TWO_PLATFORMS), &seeded()).unwrap();
        let p2 = scene.element_id("p2").unwrap();

        let rerouted = scene
            .move_element(p2, Point3::new(6.0, 0.0, 6.0))
            .unwrap();
        assert_eq!(rerouted, 1);

        let connection = scene.registry().iter().next().unwrap();
        assert_eq!(connection.curve().start().x(), -2.0);
        assert_eq!(connection.curve().end().x(), 3.0);
    }

    #[test]
    fn test_disconnect_and_clear() {
        let mut scene = Scene::from_description(&parse(TWO_PLATFORMS), &seeded()).unwrap();
        let id = scene.registry().iter().next().unwrap().id();

        assert!(scene.disconnect(id));
        assert!(!scene.disconnect(id));

        scene.connect("p2", "p1", ConnectionStyle::default()).unwrap();
        scene.set_connections_visible(false);
        assert!(!scene.registry().is_visible());

        scene.clear_connections();
        assert!(scene.registry().is_empty());
        assert_eq!(scene.elements().len(), 2);
    }

    #[test]
    fn test_element_kinds_from_description() {
        let description = parse(
            r#"
            [[element]]
            name = "db"
            kind = "database"
            radius = 0.9
            height = 1.2

            [[element]]
            name = "hub"
            kind = "standalone"
            geometry_min = [-1.0, 0.0, -1.0]
            geometry_max = [1.0, 2.0, 1.0]

            [[element]]
            name = "box"
            kind = "standalone"
            size = [2.0, 2.0, 2.0]

            [[element]]
            name = "mystery"
            kind = "hologram"
            "#,
        );
        let kinds: Vec<ElementKind> = description
            .elements()
            .iter()
            .map(|element| element.kind().unwrap())
            .collect();

        assert_eq!(
            kinds[0],
            ElementKind::DatabaseComponent {
                radius: 0.9,
                height: 1.2
            }
        );
        assert!(matches!(kinds[1], ElementKind::StandaloneComponent { .. }));
        assert_eq!(
            kinds[2].local_bounds(),
            Bounds3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
        );
        assert_eq!(kinds[3], ElementKind::GenericNode);
    }

    #[test]
    fn test_missing_size_data() {
        let description = parse(
            r#"
            [[element]]
            name = "web"
            kind = "platform"
            "#,
        );

        let result = Scene::from_description(&description, &seeded());
        assert!(matches!(result, Err(IsographError::InvalidElement(msg)) if msg.contains("web")));
    }

    #[test]
    fn test_connection_style_fields() {
        let description = parse(
            r##"
            [[connection]]
            from = "a"
            to = "b"
            curve = "sharp"
            mode = "line"
            color = "#ff0000"
            opacity = 0.5
            vertical_offset = 1.5
            arrowhead = true
            animated = false
            "##,
        );
        let style = description.connections()[0].style(None).unwrap();

        assert_eq!(style.curve_type(), CurveType::Sharp);
        assert_eq!(style.render_mode(), RenderMode::Line);
        assert_eq!(style.color().to_hex(), "#ff0000");
        assert_approx_eq!(f32, style.opacity(), 0.5);
        assert_approx_eq!(f32, style.vertical_offset(), 1.5);
        assert!(style.arrowhead());
        assert!(!style.animated());
    }

    #[test]
    fn test_connection_style_default_color() {
        let description = parse(
            r#"
            [[connection]]
            from = "a"
            to = "b"
            "#,
        );
        let color = Color::new("#123456").unwrap();
        let style = description.connections()[0].style(Some(color)).unwrap();

        assert_eq!(style.color().to_hex(), "#123456");
    }

    #[test]
    fn test_connection_style_invalid_values() {
        let description = parse(
            r#"
            [[connection]]
            from = "a"
            to = "b"
            curve = "wavy"
            "#,
        );

        let result = description.connections()[0].style(None);
        assert!(matches!(result, Err(IsographError::InvalidStyle(_))));
    }

    #[test]
    fn test_connection_style_names_parse_as_strings() {
        let description = parse(
            r#"
            [[connection]]
            from = "a"
            to = "b"
            mode = "mesh"

            [[connection]]
            from = "b"
            to = "a"
            curve = "Smooth"
            "#,
        );

        let mode = description.connections()[0].style(None);
        assert!(
            matches!(mode, Err(IsographError::InvalidStyle(msg)) if msg.contains("Invalid render mode"))
        );
        let curve = description.connections()[1].style(None);
        assert!(
            matches!(curve, Err(IsographError::InvalidStyle(msg)) if msg.contains("Invalid curve type"))
        );
    }
}
