//! CLI logic for the Isograph scene renderer.
//!
//! Reads a TOML scene file, builds the scene, advances the flow animation
//! by the requested number of ticks and writes an isometric SVG snapshot.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::ConfigError;

use std::fs;

use log::{debug, info};

use isograph::{IsographError, SceneBuilder};

/// Run the Isograph CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `IsographError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Scene parsing and validation errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), IsographError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        debug!(seed; "Overriding animation seed");
        app_config.animation_mut().set_seed(Some(seed));
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = SceneBuilder::new(app_config);
    let description = builder.parse(&source)?;
    let mut scene = builder.build(&description)?;

    for _ in 0..args.ticks {
        scene.tick();
    }
    debug!(ticks = args.ticks; "Animation advanced");

    let svg = builder.render_svg(&scene)?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
