//! Configuration types for Isograph scenes.
//!
//! This module provides configuration structures that control connector
//! routing, flow animation and styling. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources; every
//! section and field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`AnimationConfig`] - Flow particle settings and the random seed.
//! - [`RoutingConfig`] - Constants used by the connection point resolver.
//! - [`StyleConfig`] - Background and default connector colors.
//!
//! # Example
//!
//! ```
//! # use isograph::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.animation().speed_range().is_ok());
//! assert!(config.style().background_color().unwrap().is_none());
//! ```

use std::ops::RangeInclusive;

use serde::Deserialize;

use isograph_core::color::Color;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Flow animation section.
    #[serde(default)]
    animation: AnimationConfig,

    /// Connector routing section.
    #[serde(default)]
    routing: RoutingConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(animation: AnimationConfig, routing: RoutingConfig, style: StyleConfig) -> Self {
        Self {
            animation,
            routing,
            style,
        }
    }

    /// Returns the animation configuration.
    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    /// Returns the animation configuration, mutably.
    pub fn animation_mut(&mut self) -> &mut AnimationConfig {
        &mut self.animation
    }

    /// Returns the routing configuration.
    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Flow particle settings.
///
/// Particle speed is measured in curve progress per tick, so a speed of
/// `0.005` takes 200 ticks to traverse a connector regardless of its length.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    enabled: bool,
    min_speed: f32,
    max_speed: f32,
    seed: Option<u64>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_speed: 0.002,
            max_speed: 0.006,
            seed: None,
        }
    }
}

impl AnimationConfig {
    /// Returns true if connectors spawn flow particles.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the seed for particle randomization, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Enables or disables flow particles.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Fixes the seed used for particle randomization.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Sets the particle speed range.
    pub fn set_speed_range(&mut self, min_speed: f32, max_speed: f32) {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
    }

    /// Returns the validated particle speed range.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < min_speed <= max_speed < 1`.
    pub fn speed_range(&self) -> Result<RangeInclusive<f32>, String> {
        let (min, max) = (self.min_speed, self.max_speed);
        if !(min > 0.0 && min <= max && max < 1.0) {
            return Err(format!(
                "particle speed range must satisfy 0 < min_speed <= max_speed < 1, got {min}..={max}"
            ));
        }
        Ok(min..=max)
    }
}

/// Constants used when resolving connection points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    platform_clearance: f32,
    component_half_size: f32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            platform_clearance: 0.05,
            component_half_size: 0.5,
        }
    }
}

impl RoutingConfig {
    /// Height above a platform's top face at which connectors attach.
    pub fn platform_clearance(&self) -> f32 {
        self.platform_clearance
    }

    /// Nominal half-size of components resting on a platform.
    pub fn component_half_size(&self) -> f32 {
        self.component_half_size
    }
}

/// Visual styling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for exported snapshots, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Default connector [`Color`], as a color string.
    #[serde(default)]
    connection_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed default connector [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn connection_color(&self) -> Result<Option<Color>, String> {
        self.connection_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid connection color in config: {err}"))
    }
}
