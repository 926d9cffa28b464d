//! Export of scene snapshots.
//!
//! The [`Exporter`] trait turns the current state of a [`Scene`] into an
//! output document. Connector curves, arrowheads and particle positions are
//! taken as they are at the time of the call, so exporting after a number
//! of ticks captures the flow animation mid-flight.
//!
//! # Available Backends
//!
//! - [`svg`] - isometric SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`IsographError::Export`] at the crate boundary.
//!
//! [`IsographError::Export`]: crate::IsographError::Export

pub mod svg;

use std::fmt;

use crate::scene::Scene;

/// Abstraction for snapshot export backends.
pub trait Exporter {
    /// Renders the scene to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted.
    fn export_scene(&self, scene: &Scene) -> Result<String, Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
