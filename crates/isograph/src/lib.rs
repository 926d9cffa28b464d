//! Isograph - connector routing for isometric architecture diagrams.
//!
//! Isograph computes where connectors attach to 3D elements (platforms,
//! components, databases), shapes the cubic Bézier curves between them and
//! animates flow particles along those curves. Scenes can be described in
//! TOML and exported as isometric SVG snapshots.
//!
//! # Overview
//!
//! - [`routing`] - Connection point resolution and curve construction.
//! - [`registry`] - Live connectors and their flow particles.
//! - [`scene`] - Named elements, connectors and the scene file model.
//! - [`config`] - Animation, routing and style configuration.
//! - [`export`] - Snapshot export backends.

pub mod config;
pub mod export;
pub mod registry;
pub mod routing;
pub mod scene;

mod error;

pub use isograph_core::{color, curve, draw, element, geometry};

pub use error::IsographError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use scene::{Scene, SceneDescription};

/// Builder for parsing, building and rendering Isograph scenes.
///
/// # Examples
///
/// ```rust
/// use isograph::{SceneBuilder, config::AppConfig};
///
/// let source = r#"
///     [[element]]
///     name = "web"
///     kind = "platform"
///     position = [-6.0, 0.0, 6.0]
///     size = [8.0, 0.4, 4.0]
///
///     [[element]]
///     name = "api"
///     kind = "platform"
///     position = [-6.0, 0.0, 1.0]
///     size = [6.0, 0.4, 3.0]
///
///     [[connection]]
///     from = "web"
///     to = "api"
/// "#;
///
/// let builder = SceneBuilder::new(AppConfig::default());
/// let description = builder.parse(source).expect("Failed to parse");
/// let mut scene = builder.build(&description).expect("Failed to build");
///
/// scene.tick();
///
/// let svg = builder.render_svg(&scene).expect("Failed to render");
/// assert!(svg.contains("<path"));
/// ```
#[derive(Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including animation, routing
    ///   and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse TOML scene source into a scene description.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::Parse`] with the offending span when the
    /// source is not a valid scene file.
    pub fn parse(&self, source: &str) -> Result<SceneDescription, IsographError> {
        info!("Parsing scene");

        let description: SceneDescription = toml::from_str(source).map_err(|err| {
            IsographError::new_parse_error(err.message(), err.span(), source)
        })?;

        debug!(
            elements = description.elements().len(),
            connections = description.connections().len();
            "Scene parsed successfully"
        );
        trace!(description:?; "Parsed scene");

        Ok(description)
    }

    /// Build a live scene from a description.
    ///
    /// Elements are placed, every connector is routed and flow particles are
    /// spawned according to the animation configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError`] for invalid configuration, duplicate or
    /// unknown element names, missing size data and invalid style values.
    pub fn build(&self, description: &SceneDescription) -> Result<Scene, IsographError> {
        info!("Building scene");
        Scene::from_description(description, &self.config)
    }

    /// Render the current state of a scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`IsographError::Export`] for an invalid background color or
    /// non-finite scene coordinates.
    pub fn render_svg(&self, scene: &Scene) -> Result<String, IsographError> {
        info!("Rendering scene");

        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = exporter.export_scene(scene)?;

        info!("SVG rendered successfully");
        Ok(svg)
    }
}
