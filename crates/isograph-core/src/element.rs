//! Scene elements and the arena that owns them.
//!
//! An [`Element`] is a positioned shape. Its [`ElementKind`] is a tagged
//! union carrying the kind-specific size data needed to find points on the
//! shape's surface. Elements are stored in an [`ElementArena`] and referred
//! to by integer [`ElementId`] handles.

use std::fmt;

use log::trace;

use crate::geometry::{Bounds3, Point3, Size3};

/// Handle to an element stored in an [`ElementArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Returns the raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// The shape family of an element, with its size data.
///
/// # Variants
///
/// - `Platform`: a wide, flat slab that hosts components
/// - `StandaloneComponent`: a component with no platform beneath it; its
///   `geometry` is the measured bounding box of the rendered shape, relative
///   to the element position
/// - `PlatformComponent`: a component resting on a platform, sized by a
///   nominal display size
/// - `DatabaseComponent`: an upright cylinder
/// - `GenericNode`: anything else; connectors attach at its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    Platform { size: Size3 },
    StandaloneComponent { geometry: Bounds3 },
    PlatformComponent { size: Size3 },
    DatabaseComponent { radius: f32, height: f32 },
    GenericNode,
}

impl ElementKind {
    /// Returns the short lowercase name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            Self::Platform { .. } => "platform",
            Self::StandaloneComponent { .. } => "standalone",
            Self::PlatformComponent { .. } => "component",
            Self::DatabaseComponent { .. } => "database",
            Self::GenericNode => "node",
        }
    }

    /// Bounds of the shape relative to the element position.
    ///
    /// Generic nodes have zero-sized bounds.
    pub fn local_bounds(&self) -> Bounds3 {
        match *self {
            Self::Platform { size } | Self::PlatformComponent { size } => {
                Bounds3::new_from_center(Point3::default(), size)
            }
            Self::StandaloneComponent { geometry } => geometry,
            Self::DatabaseComponent { radius, height } => Bounds3::new_from_center(
                Point3::default(),
                Size3::new(radius * 2.0, height, radius * 2.0),
            ),
            Self::GenericNode => Bounds3::default(),
        }
    }
}

/// A positioned shape in the scene.
///
/// The shape is fixed at creation; only the position may change afterwards
/// (hover and float animations move elements around).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    position: Point3,
    label: Option<String>,
    layer: Option<String>,
}

impl Element {
    /// Returns the arena handle of this element
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the element kind and its size data
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Returns the world-space center of the element
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Moves the element to a new world-space center
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    /// Returns the display label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sets the display label
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = Some(label.into());
    }

    /// Returns the name of the owning layer, if any
    pub fn layer(&self) -> Option<&str> {
        self.layer.as_deref()
    }

    /// Sets the owning layer name
    pub fn set_layer(&mut self, layer: impl Into<String>) {
        self.layer = Some(layer.into());
    }

    /// Returns the world-space bounding box of the shape
    pub fn world_bounds(&self) -> Bounds3 {
        self.kind.local_bounds().translate(self.position)
    }
}

/// Owns all elements of a scene and hands out [`ElementId`] handles.
///
/// Elements are never removed, so handles stay valid for the lifetime of
/// the arena.
#[derive(Debug, Clone, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
}

impl ElementArena {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element and returns its handle
    ///
    /// # Examples
    ///
    /// ```
    /// use isograph_core::element::{ElementArena, ElementKind};
    /// use isograph_core::geometry::Point3;
    ///
    /// let mut arena = ElementArena::new();
    /// let id = arena.insert(ElementKind::GenericNode, Point3::new(1.0, 0.0, 2.0));
    ///
    /// assert_eq!(arena.get(id).map(|e| e.position()), Some(Point3::new(1.0, 0.0, 2.0)));
    /// ```
    pub fn insert(&mut self, kind: ElementKind, position: Point3) -> ElementId {
        let id = ElementId(self.elements.len());
        trace!(element_id = id.index(), kind = kind.name(); "Element inserted");
        self.elements.push(Element {
            id,
            kind,
            position,
            label: None,
            layer: None,
        });
        id
    }

    /// Returns the element for a handle
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Returns the element for a handle, mutably
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Returns the number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the arena holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over all elements in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_arena_insert_assigns_sequential_ids() {
        let mut arena = ElementArena::new();
        let a = arena.insert(ElementKind::GenericNode, Point3::default());
        let b = arena.insert(ElementKind::GenericNode, Point3::new(1.0, 0.0, 0.0));

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(b).map(Element::id), Some(b));
    }

    #[test]
    fn test_arena_get_mut_moves_element() {
        let mut arena = ElementArena::new();
        let id = arena.insert(ElementKind::GenericNode, Point3::default());

        if let Some(element) = arena.get_mut(id) {
            element.set_position(Point3::new(0.0, 2.0, 0.0));
        }

        assert_eq!(arena.get(id).unwrap().position(), Point3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_element_metadata() {
        let mut arena = ElementArena::new();
        let id = arena.insert(ElementKind::GenericNode, Point3::default());
        let element = arena.get_mut(id).unwrap();

        assert_eq!(element.label(), None);
        element.set_label("Gateway");
        element.set_layer("Edge");

        assert_eq!(element.label(), Some("Gateway"));
        assert_eq!(element.layer(), Some("Edge"));
    }

    #[test]
    fn test_world_bounds_per_kind() {
        let mut arena = ElementArena::new();
        let platform = arena.insert(
            ElementKind::Platform {
                size: Size3::new(8.0, 0.4, 4.0),
            },
            Point3::new(-6.0, 0.0, 6.0),
        );
        let database = arena.insert(
            ElementKind::DatabaseComponent {
                radius: 0.9,
                height: 1.2,
            },
            Point3::new(2.0, 0.0, -4.0),
        );
        let standalone = arena.insert(
            ElementKind::StandaloneComponent {
                geometry: Bounds3::new(Point3::new(-1.0, 0.0, -0.5), Point3::new(1.0, 1.5, 0.5)),
            },
            Point3::new(10.0, 0.0, 0.0),
        );

        let bounds = arena.get(platform).unwrap().world_bounds();
        assert_eq!(bounds.min(), Point3::new(-10.0, -0.2, 4.0));
        assert_eq!(bounds.max(), Point3::new(-2.0, 0.2, 8.0));

        let bounds = arena.get(database).unwrap().world_bounds();
        assert_approx_eq!(f32, bounds.min().x(), 1.1, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.min().y(), -0.6, epsilon = 1e-5);
        assert_approx_eq!(f32, bounds.max().z(), -3.1, epsilon = 1e-5);

        let bounds = arena.get(standalone).unwrap().world_bounds();
        assert_eq!(bounds.center(), Point3::new(10.0, 0.75, 0.0));
    }

    #[test]
    fn test_unknown_handle() {
        let arena = ElementArena::new();
        assert!(arena.get(ElementId(3)).is_none());
        assert!(arena.is_empty());
    }
}
