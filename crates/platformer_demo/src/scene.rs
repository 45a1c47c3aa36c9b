//! Walled room scene
//!
//! Builds a closed room, drops the player in, and replays the scripted input
//! frame by frame.

use platformer_physics::prelude::*;

use crate::config::{Action, DemoConfig};
use crate::DemoError;

/// Totals gathered over a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    /// Frames simulated
    pub frames: u32,

    /// Resolved collisions involving the player
    pub player_collisions: usize,

    /// Pass-through intersections of any body
    pub intersections: usize,

    /// Jump cues that fired while the player was grounded
    pub jumps: usize,

    /// Player position after the last frame
    pub final_position: Vec2,
}

/// The demo world
pub struct Scene {
    engine: PhysicsEngine,
    player: BodyHandle,
    config: DemoConfig,
}

impl Scene {
    /// Build the room and spawn the player
    pub fn build(config: DemoConfig) -> Self {
        let mut engine = PhysicsEngine::new(config.physics.clone());

        let size = config.room.size;
        let wall = config.room.wall_thickness;
        let inner = size - wall - 1.0;
        let walls = [
            Aabb::new(Vec2::new(0.0, inner), Vec2::new(size - 1.0, wall)),
            Aabb::new(Vec2::new(inner, 0.0), Vec2::new(wall, inner)),
            Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(wall, inner)),
            Aabb::new(Vec2::new(wall, 0.0), Vec2::new(inner - wall, wall)),
        ];
        for bounds in walls {
            engine.add_body(Body::fixed(bounds));
        }

        let tuning = &config.player;
        let player = engine.add_body(
            Body::dynamic(Aabb::new(tuning.spawn, tuning.size), tuning.mass)
                .with_bounce(tuning.bounce)
                .with_drag(tuning.drag),
        );
        log::info!("Room {}x{} ready, player spawned at {:?}", size, size, tuning.spawn);

        Self { engine, player, config }
    }

    /// Physics engine driving the scene
    pub const fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    /// Handle of the player body
    pub const fn player(&self) -> BodyHandle {
        self.player
    }

    /// Simulate every configured frame
    ///
    /// # Errors
    ///
    /// Fails if the engine rejects an update.
    pub fn run(&mut self) -> Result<RunSummary, DemoError> {
        let mut summary = RunSummary::default();
        for frame in 0..self.config.frames {
            if self.apply_cues(frame)? {
                summary.jumps += 1;
            }

            let events = self.engine.step(self.config.frame_time)?;
            for event in &events {
                match event.kind {
                    ContactKind::Collision { resolved: true, .. } if event.involves(self.player) => {
                        summary.player_collisions += 1;
                    }
                    ContactKind::Intersection => summary.intersections += 1,
                    ContactKind::Collision { .. } => {}
                }
                log::trace!("frame {}: {:?}", frame, event);
            }

            summary.frames = frame + 1;
            if self.config.report_every > 0 && frame % self.config.report_every == 0 {
                self.report(frame);
            }
        }

        if let Some(body) = self.engine.body(self.player) {
            summary.final_position = body.bounds().position();
        }
        Ok(summary)
    }

    /// Apply every cue active on `frame`; returns whether the player jumped
    fn apply_cues(&mut self, frame: u32) -> Result<bool, DemoError> {
        let grounded = self.engine.is_touching(self.player, Direction::SOUTH)?;
        let push = self.config.player.push_force;
        let jump = self.config.player.jump_force;

        let mut jumped = false;
        let mut blocks = Vec::new();
        let Some(player) = self.engine.body_mut(self.player) else {
            return Err(DemoError::MissingPlayer);
        };
        for cue in self.config.script.iter().filter(|cue| cue.is_active(frame)) {
            match &cue.action {
                Action::Left => player.add_force_on(Direction::WEST, -push),
                Action::Right => player.add_force_on(Direction::EAST, push),
                Action::Jump if grounded => {
                    player.add_force_on(Direction::NORTH, -jump);
                    jumped = true;
                }
                Action::Jump => log::debug!("frame {}: jump ignored while airborne", frame),
                Action::Block { from, to } => blocks.push(Aabb::from_points(*from, *to)),
            }
        }

        for bounds in blocks {
            log::info!("frame {}: placing block {:?}", frame, bounds);
            self.engine.add_body(Body::fixed(bounds));
        }
        Ok(jumped)
    }

    fn report(&self, frame: u32) {
        if let Some(body) = self.engine.body(self.player) {
            let position = body.bounds().position();
            let velocity = body.velocity();
            log::info!(
                "frame {:>4}: player at ({:7.2}, {:7.2}) moving ({:8.2}, {:8.2})",
                frame,
                position.x,
                position.y,
                velocity.x,
                velocity.y
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(config: DemoConfig) -> DemoConfig {
        platformer_physics::foundation::logging::init_for_tests();
        DemoConfig { report_every: 0, ..config }
    }

    #[test]
    fn test_room_has_four_walls_and_a_player() {
        let scene = Scene::build(quiet(DemoConfig::default()));
        assert_eq!(scene.engine().len(), 5);
        assert_eq!(scene.engine().movable(), &[scene.player()]);
    }

    #[test]
    fn test_player_settles_on_the_floor() {
        let mut scene = Scene::build(quiet(DemoConfig {
            frames: 600,
            script: Vec::new(),
            ..DemoConfig::default()
        }));
        let summary = scene.run().unwrap();

        assert_eq!(summary.frames, 600);
        assert!(summary.player_collisions > 0);
        assert_eq!(summary.final_position.x, 100.0);
        assert_eq!(summary.final_position.y, 370.0);
        assert!(scene.engine().is_touching(scene.player(), Direction::SOUTH).unwrap());
    }

    #[test]
    fn test_scripted_run_stays_inside_the_room() {
        let mut scene = Scene::build(quiet(DemoConfig::default()));
        let summary = scene.run().unwrap();

        assert_eq!(scene.engine().len(), 6);
        let (x, y) = (summary.final_position.x, summary.final_position.y);
        assert!((9.0..=370.0).contains(&x), "player escaped horizontally: {x}");
        assert!((9.0..=370.0).contains(&y), "player escaped vertically: {y}");
    }

    #[test]
    fn test_zero_mass_player_falls_back_to_default_mass() {
        let mut config = quiet(DemoConfig {
            frames: 30,
            script: Vec::new(),
            ..DemoConfig::default()
        });
        config.player.mass = 0.0;
        let mut scene = Scene::build(config);

        let player = scene.engine().body(scene.player()).unwrap();
        assert_eq!(player.mass(), Some(platformer_physics::physics::body::DEFAULT_MASS));

        let summary = scene.run().unwrap();
        assert!(summary.final_position.x.is_finite() && summary.final_position.y.is_finite());
    }

    #[test]
    fn test_jump_requires_ground() {
        let mut scene = Scene::build(quiet(DemoConfig {
            frames: 2,
            script: vec![crate::config::Cue {
                frame: 0,
                duration: 2,
                action: Action::Jump,
            }],
            ..DemoConfig::default()
        }));
        // Spawned mid-air
        assert_eq!(scene.run().unwrap().jumps, 0);
    }
}
