//! Headless room demo
//!
//! Runs the scripted walled-room scene and logs the player's progress.
//! Pass a `.toml` or `.ron` file to override the default configuration:
//!
//! ```text
//! RUST_LOG=debug platformer_demo room.toml
//! ```

mod config;
mod scene;

use platformer_physics::prelude::*;

use crate::config::DemoConfig;
use crate::scene::Scene;

/// Errors that end the demo
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    /// The configuration file could not be used
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    /// The engine rejected an operation
    #[error("physics: {0}")]
    Physics(#[from] PhysicsError),

    /// The player body disappeared from the engine
    #[error("player body is no longer registered")]
    MissingPlayer,
}

fn main() {
    platformer_physics::foundation::logging::init();

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            DemoConfig::load_from_file(&path)?
        }
        None => DemoConfig::default(),
    };

    let mut scene = Scene::build(config);
    let summary = scene.run()?;

    log::info!(
        "Simulated {} frames: {} player collisions, {} intersections, {} jumps",
        summary.frames,
        summary.player_collisions,
        summary.intersections,
        summary.jumps
    );
    log::info!(
        "Player finished at ({:.2}, {:.2}) among {} bodies",
        summary.final_position.x,
        summary.final_position.y,
        scene.engine().len()
    );
    if let Some(player) = scene.engine().body(scene.player()) {
        log::debug!("Final player state: {:?}", player);
    }
    Ok(())
}
