//! Connector style definitions.
//!
//! A [`ConnectionStyle`] is a plain bag of options supplied by diagram
//! configuration. It controls the routing profile ([`CurveType`] plus the
//! vertical/horizontal offsets and curvature) and how a renderer draws the
//! connector ([`RenderMode`], color, opacity, arrowhead, flow animation).

use std::{fmt, str};

use crate::color::Color;

/// Defines the routing profile of a connector curve.
///
/// # Variants
///
/// - `Architectural`: a rounded hump rising above the taller endpoint
/// - `Smooth`: a gentle bow with a sideways offset, for parallel connectors
/// - `Sharp`: a low, near-triangular hump
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveType {
    #[default]
    Architectural,
    Smooth,
    Sharp,
}

impl CurveType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Architectural => "architectural",
            Self::Smooth => "smooth",
            Self::Sharp => "sharp",
        }
    }
}

impl str::FromStr for CurveType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "architectural" => Ok(Self::Architectural),
            "smooth" => Ok(Self::Smooth),
            "sharp" => Ok(Self::Sharp),
            _ => Err("Invalid curve type"),
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the body of a connector is drawn.
///
/// - `Tube`: a solid tube swept along the curve
/// - `Line`: a thin polyline through sampled curve points
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    Tube,
    Line,
}

impl str::FromStr for RenderMode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tube" => Ok(Self::Tube),
            "line" => Ok(Self::Line),
            _ => Err("Invalid render mode"),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tube => f.write_str("tube"),
            Self::Line => f.write_str("line"),
        }
    }
}

/// Visual and routing options of a connector.
///
/// # Examples
///
/// ```
/// use isograph_core::draw::{ConnectionStyle, CurveType};
///
/// let style = ConnectionStyle::default()
///     .with_curve_type(CurveType::Smooth)
///     .with_horizontal_offset(0.4)
///     .with_arrowhead(true);
///
/// assert_eq!(style.curve_type(), CurveType::Smooth);
/// assert!(style.arrowhead());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionStyle {
    color: Color,
    opacity: f32,
    curve_type: CurveType,
    vertical_offset: f32,
    horizontal_offset: f32,
    curvature: f32,
    render_mode: RenderMode,
    tube_radius: f32,
    arrowhead: bool,
    animated: bool,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            color: Color::new("#4fc3f7").expect("'#4fc3f7' is a valid CSS color"),
            opacity: 0.8,
            curve_type: CurveType::default(),
            vertical_offset: 0.5,
            horizontal_offset: 0.0,
            curvature: 0.3,
            render_mode: RenderMode::default(),
            tube_radius: 0.04,
            arrowhead: false,
            animated: true,
        }
    }
}

impl ConnectionStyle {
    /// Gets the connector color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Gets the connector opacity
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Gets the routing profile
    pub fn curve_type(&self) -> CurveType {
        self.curve_type
    }

    /// Gets the height the curve rises above its endpoints
    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// Gets the sideways bow of smooth curves
    pub fn horizontal_offset(&self) -> f32 {
        self.horizontal_offset
    }

    /// Gets the fraction of the chord used to place smooth control points
    pub fn curvature(&self) -> f32 {
        self.curvature
    }

    /// Gets the render mode
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Gets the tube radius used in [`RenderMode::Tube`]
    pub fn tube_radius(&self) -> f32 {
        self.tube_radius
    }

    /// Returns true if an arrowhead is drawn at the target end
    pub fn arrowhead(&self) -> bool {
        self.arrowhead
    }

    /// Returns true if a flow particle travels along the connector
    pub fn animated(&self) -> bool {
        self.animated
    }

    /// Sets the connector color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the connector opacity, clamped to `[0, 1]`
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Sets the routing profile
    pub fn set_curve_type(&mut self, curve_type: CurveType) {
        self.curve_type = curve_type;
    }

    /// Sets the vertical offset
    pub fn set_vertical_offset(&mut self, offset: f32) {
        self.vertical_offset = offset;
    }

    /// Sets the horizontal offset
    pub fn set_horizontal_offset(&mut self, offset: f32) {
        self.horizontal_offset = offset;
    }

    /// Sets the curvature
    pub fn set_curvature(&mut self, curvature: f32) {
        self.curvature = curvature;
    }

    /// Sets the render mode
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
    }

    /// Sets the tube radius
    pub fn set_tube_radius(&mut self, radius: f32) {
        self.tube_radius = radius;
    }

    /// Enables or disables the arrowhead
    pub fn set_arrowhead(&mut self, arrowhead: bool) {
        self.arrowhead = arrowhead;
    }

    /// Enables or disables the flow particle
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
    }

    /// Builder form of [`Self::set_color`]
    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    /// Builder form of [`Self::set_opacity`]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    /// Builder form of [`Self::set_curve_type`]
    pub fn with_curve_type(mut self, curve_type: CurveType) -> Self {
        self.set_curve_type(curve_type);
        self
    }

    /// Builder form of [`Self::set_vertical_offset`]
    pub fn with_vertical_offset(mut self, offset: f32) -> Self {
        self.set_vertical_offset(offset);
        self
    }

    /// Builder form of [`Self::set_horizontal_offset`]
    pub fn with_horizontal_offset(mut self, offset: f32) -> Self {
        self.set_horizontal_offset(offset);
        self
    }

    /// Builder form of [`Self::set_curvature`]
    pub fn with_curvature(mut self, curvature: f32) -> Self {
        self.set_curvature(curvature);
        self
    }

    /// Builder form of [`Self::set_render_mode`]
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.set_render_mode(mode);
        self
    }

    /// Builder form of [`Self::set_tube_radius`]
    pub fn with_tube_radius(mut self, radius: f32) -> Self {
        self.set_tube_radius(radius);
        self
    }

    /// Builder form of [`Self::set_arrowhead`]
    pub fn with_arrowhead(mut self, arrowhead: bool) -> Self {
        self.set_arrowhead(arrowhead);
        self
    }

    /// Builder form of [`Self::set_animated`]
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.set_animated(animated);
        self
    }
}
