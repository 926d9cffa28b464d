//! Connection registry and flow animation.
//!
//! [`ConnectionRegistry`] owns every live connector of a scene. Adding a
//! connection resolves its attachment points, builds its curve and, when
//! animation is enabled, spawns a [`FlowParticle`] that travels along it.
//! [`ConnectionRegistry::tick`] advances all particles by one frame.
//!
//! Connections reference their endpoint elements by [`ElementId`] only; the
//! registry never owns elements. When an element moves, the owner of the
//! elements calls [`ConnectionRegistry::reroute`] with the new positions.
//!
//! # Determinism
//!
//! Particle start offsets and speeds come from a seeded [`StdRng`]. With a
//! fixed seed in [`AnimationConfig`], the same sequence of `add` calls always
//! produces the same particles.

use std::{fmt, ops::RangeInclusive};

use indexmap::IndexMap;
use log::{debug, trace, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use isograph_core::{
    curve::CubicBezier,
    draw::{Arrowhead, ConnectionStyle, RenderMode},
    element::{Element, ElementId},
    geometry::Point3,
};

use crate::{
    config::{AnimationConfig, AppConfig},
    error::IsographError,
    routing::{self, AnchorResolver},
};

/// Opaque handle of a registered connection.
///
/// Handles are never reused, even after the connection is removed or the
/// registry cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Returns the raw handle value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Render-ready description of a connector body and its overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionVisual {
    render_mode: RenderMode,
    tube_radius: f32,
    arrowhead: Option<Arrowhead>,
}

impl ConnectionVisual {
    fn new(curve: &CubicBezier, style: &ConnectionStyle) -> Self {
        Self {
            render_mode: style.render_mode(),
            tube_radius: style.tube_radius(),
            arrowhead: style.arrowhead().then(|| Arrowhead::from_curve(curve)),
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn tube_radius(&self) -> f32 {
        self.tube_radius
    }

    /// Returns the arrowhead at the target end, if the style asked for one
    pub fn arrowhead(&self) -> Option<&Arrowhead> {
        self.arrowhead.as_ref()
    }
}

/// A routed connector between two elements.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    source: ElementId,
    target: ElementId,
    style: ConnectionStyle,
    curve: CubicBezier,
    visual: ConnectionVisual,
}

impl Connection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn style(&self) -> &ConnectionStyle {
        &self.style
    }

    /// Returns the routed curve, from source attachment to target attachment
    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    pub fn visual(&self) -> &ConnectionVisual {
        &self.visual
    }

    /// Returns true if either endpoint is `element`
    pub fn touches(&self, element: ElementId) -> bool {
        self.source == element || self.target == element
    }

    fn set_route(&mut self, curve: CubicBezier) {
        self.visual = ConnectionVisual::new(&curve, &self.style);
        self.curve = curve;
    }
}

/// A marker traveling along a connector curve.
///
/// `progress` is the curve parameter in `[0, 1)`; `speed` is how much
/// progress is added per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParticle {
    connection: ConnectionId,
    progress: f32,
    speed: f32,
    position: Point3,
}

impl FlowParticle {
    fn new(connection: ConnectionId, progress: f32, speed: f32, curve: &CubicBezier) -> Self {
        Self {
            connection,
            progress,
            speed,
            position: curve.sample_at(progress),
        }
    }

    /// Returns the connection this particle travels along
    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Returns the world position, the curve sampled at the current progress
    pub fn position(&self) -> Point3 {
        self.position
    }

    fn advance(&mut self, curve: &CubicBezier) {
        self.progress = (self.progress + self.speed) % 1.0;
        self.position = curve.sample_at(self.progress);
    }

    fn follow(&mut self, curve: &CubicBezier) {
        self.position = curve.sample_at(self.progress);
    }
}

/// Owns all connections of a scene and animates their flow particles.
///
/// # Examples
///
/// ```
/// use isograph::{config::AppConfig, registry::ConnectionRegistry};
/// use isograph_core::draw::ConnectionStyle;
/// use isograph_core::element::{ElementArena, ElementKind};
/// use isograph_core::geometry::Point3;
///
/// let mut arena = ElementArena::new();
/// let a = arena.insert(ElementKind::GenericNode, Point3::new(0.0, 0.0, 0.0));
/// let b = arena.insert(ElementKind::GenericNode, Point3::new(4.0, 0.0, 0.0));
///
/// let mut registry = ConnectionRegistry::new(&AppConfig::default()).unwrap();
/// let id = registry.add(
///     arena.get(a).unwrap(),
///     arena.get(b).unwrap(),
///     ConnectionStyle::default(),
/// );
///
/// registry.tick();
/// assert!(registry.particle(id).is_some());
/// assert!(registry.remove(id));
/// assert!(!registry.remove(id));
/// ```
#[derive(Debug)]
pub struct ConnectionRegistry {
    resolver: AnchorResolver,
    animation_enabled: bool,
    speed_range: RangeInclusive<f32>,
    rng: StdRng,
    next_id: u64,
    visible: bool,
    connections: IndexMap<ConnectionId, Connection>,
    particles: IndexMap<ConnectionId, FlowParticle>,
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    ///
    /// The random generator is seeded from the animation seed when set, and
    /// from the operating system otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::Config`] if the particle speed range is
    /// invalid.
    pub fn new(config: &AppConfig) -> Result<Self, IsographError> {
        let animation = config.animation();
        let rng = match animation.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(AnchorResolver::from(config.routing()), animation, rng)
    }

    /// Creates an empty registry drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::Config`] if the particle speed range is
    /// invalid.
    pub fn with_rng(
        resolver: AnchorResolver,
        animation: &AnimationConfig,
        rng: StdRng,
    ) -> Result<Self, IsographError> {
        let speed_range = animation.speed_range().map_err(IsographError::Config)?;

        Ok(Self {
            resolver,
            animation_enabled: animation.enabled(),
            speed_range,
            rng,
            next_id: 0,
            visible: true,
            connections: IndexMap::new(),
            particles: IndexMap::new(),
        })
    }

    /// Routes and registers a connector from `source` to `target`.
    ///
    /// Spawns a flow particle at a random progress with a random speed when
    /// both the registry and the style have animation enabled.
    pub fn add(
        &mut self,
        source: &Element,
        target: &Element,
        style: ConnectionStyle,
    ) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;

        let curve = routing::route(&self.resolver, source, target, &style);

        if self.animation_enabled && style.animated() {
            let progress = self.rng.random_range(0.0..1.0);
            let speed = self.rng.random_range(self.speed_range.clone());
            trace!(
                connection_id:% = id,
                progress = progress,
                speed = speed;
                "Spawned flow particle"
            );
            self.particles
                .insert(id, FlowParticle::new(id, progress, speed, &curve));
        }

        debug!(
            connection_id:% = id,
            source:% = source.id(),
            target:% = target.id(),
            curve_type:% = style.curve_type();
            "Connection added"
        );

        let visual = ConnectionVisual::new(&curve, &style);
        self.connections.insert(
            id,
            Connection {
                id,
                source: source.id(),
                target: target.id(),
                style,
                curve,
                visual,
            },
        );
        id
    }

    /// Removes a connection and its particle.
    ///
    /// Returns false if `id` is not registered.
    pub fn remove(&mut self, id: ConnectionId) -> bool {
        let removed = self.connections.shift_remove(&id).is_some();
        self.particles.shift_remove(&id);

        if removed {
            debug!(connection_id:% = id; "Connection removed");
        } else {
            warn!(connection_id:% = id; "Attempted to remove unknown connection");
        }
        removed
    }

    /// Re-resolves the attachment points and curve of a connection after its
    /// endpoints moved. The particle keeps its progress.
    ///
    /// Returns false if `id` is not registered.
    pub fn reroute(&mut self, id: ConnectionId, source: &Element, target: &Element) -> bool {
        let Some(connection) = self.connections.get_mut(&id) else {
            return false;
        };

        let curve = routing::route(&self.resolver, source, target, &connection.style);
        if let Some(particle) = self.particles.get_mut(&id) {
            particle.follow(&curve);
        }
        connection.set_route(curve);

        trace!(connection_id:% = id; "Connection rerouted");
        true
    }

    /// Advances every particle by its speed, wrapping past the end of the
    /// curve back to the start.
    ///
    /// Particles keep moving while connectors are hidden, so showing them
    /// again does not restart the flow.
    pub fn tick(&mut self) {
        for particle in self.particles.values_mut() {
            if let Some(connection) = self.connections.get(&particle.connection) {
                particle.advance(&connection.curve);
            }
        }
    }

    /// Shows or hides all connectors and particles
    pub fn set_visible(&mut self, visible: bool) {
        debug!(visible = visible; "Connection visibility changed");
        self.visible = visible;
    }

    /// Returns true if connectors are shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Removes every connection and particle. Handles are not reset.
    pub fn clear(&mut self) {
        debug!(count = self.connections.len(); "Clearing connections");
        self.connections.clear();
        self.particles.clear();
    }

    /// Returns a connection by handle
    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// Returns the flow particle of a connection, if it has one
    pub fn particle(&self, id: ConnectionId) -> Option<&FlowParticle> {
        self.particles.get(&id)
    }

    /// Iterates over connections in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Iterates over particles in insertion order
    pub fn particles(&self) -> impl Iterator<Item = &FlowParticle> {
        self.particles.values()
    }

    /// Returns the handles of all connections with `element` as an endpoint
    pub fn connections_touching(&self, element: ElementId) -> Vec<ConnectionId> {
        self.connections
            .values()
            .filter(|connection| connection.touches(element))
            .map(Connection::id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
