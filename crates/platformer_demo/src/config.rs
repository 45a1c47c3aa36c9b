//! Demo configuration
//!
//! Everything the room demo needs: world physics, room layout, the player's
//! tuning and a scripted input track standing in for a keyboard. Loadable
//! from `.toml` or `.ron`; missing fields fall back to the defaults below.

use platformer_physics::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// World physics settings
    pub physics: PhysicsConfig,

    /// Room layout
    pub room: RoomConfig,

    /// Player tuning
    pub player: PlayerConfig,

    /// Number of frames to simulate
    pub frames: u32,

    /// Seconds per frame
    pub frame_time: f32,

    /// Log the player's state every this many frames (0 disables)
    pub report_every: u32,

    /// Scripted input
    pub script: Vec<Cue>,
}

/// Square room enclosed by four static walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Outer edge length
    pub size: f32,

    /// Wall thickness
    pub wall_thickness: f32,
}

/// Player body and controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Top-left corner at spawn
    pub spawn: Vec2,

    /// Width and height
    pub size: Vec2,

    /// Mass
    pub mass: f32,

    /// Bounce coefficient
    pub bounce: f32,

    /// Drag coefficient
    pub drag: f32,

    /// Force applied while a push cue is active
    pub push_force: f32,

    /// Force applied for one frame when jumping from the ground
    pub jump_force: f32,
}

/// What a scripted cue does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Push the player left
    Left,
    /// Push the player right
    Right,
    /// Jump if standing on something
    Jump,
    /// Drop a static block spanning two corner points
    Block {
        /// First corner
        from: Vec2,
        /// Opposite corner
        to: Vec2,
    },
}

/// A scripted input, active from `frame` for `duration` frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// First frame the cue is active on
    pub frame: u32,

    /// Number of frames the cue stays active (at least one)
    #[serde(default = "one_frame")]
    pub duration: u32,

    /// What happens
    pub action: Action,
}

const fn one_frame() -> u32 {
    1
}

impl Cue {
    /// Whether the cue applies on `frame`
    pub fn is_active(&self, frame: u32) -> bool {
        frame >= self.frame && frame - self.frame < self.duration.max(1)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig {
                gravity: Vec2::new(0.0, 9.8 * 20.0),
                ..PhysicsConfig::default()
            },
            room: RoomConfig::default(),
            player: PlayerConfig::default(),
            frames: 360,
            frame_time: 1.0 / 60.0,
            report_every: 30,
            script: vec![
                Cue {
                    frame: 0,
                    duration: 1,
                    action: Action::Block {
                        from: Vec2::new(300.0, 390.0),
                        to: Vec2::new(250.0, 350.0),
                    },
                },
                Cue { frame: 120, duration: 120, action: Action::Right },
                Cue { frame: 200, duration: 1, action: Action::Jump },
                Cue { frame: 260, duration: 60, action: Action::Left },
            ],
        }
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            size: 400.0,
            wall_thickness: 9.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(100.0, 100.0),
            size: Vec2::new(20.0, 20.0),
            mass: 10.0,
            bounce: 0.5,
            drag: 0.01,
            push_force: 3000.0,
            jump_force: 100_000.0,
        }
    }
}

impl Config for DemoConfig {}
