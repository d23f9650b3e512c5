//! Space Adventure - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, game state)
//! - `game`: Fixed-timestep frame loop tying the simulation to its collaborators
//! - `renderer`: Maps simulation snapshots to draw commands
//! - `audio`: Fire-and-forget sound cues
//! - `platform`: Clock and input abstractions
//! - `settings`: JSON configuration

pub mod audio;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{FrameOutcome, Game};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (screen space, y grows downward)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap fed into the accumulator in one frame
    pub const MAX_FRAME_GAP_MS: f64 = 100.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 50.0;
    pub const PLAYER_SPEED: f32 = 7.0;
    pub const PLAYER_START_Y: f32 = HEIGHT - 100.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_MAX_SHIELD: i32 = 100;
    pub const PLAYER_START_LIVES: u32 = 3;
    pub const FIRE_COOLDOWN_MS: u64 = 300;
    pub const RAPID_FIRE_COOLDOWN_MS: u64 = 150;
    pub const INVINCIBILITY_MS: u64 = 2000;
    pub const RAPID_FIRE_MS: u64 = 10_000;
    pub const MULTI_SHOT_MS: u64 = 8_000;
    /// Invincible ship flashes on the first half of each period
    pub const INVINCIBLE_FLASH_PERIOD_MS: u64 = 200;

    /// Projectiles
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BOSS_BULLET_SPEED: f32 = 5.0;
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const BULLET_MARGIN: f32 = 10.0;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 40.0;
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;
    pub const ZIGZAG_PERIOD_TICKS: u32 = 30;
    pub const HOMING_NUDGE: f32 = 0.1;
    pub const HOMING_MAX_DX: f32 = 2.0;

    /// Boss
    pub const BOSS_SIZE: f32 = 100.0;
    pub const BOSS_HOLD_Y: f32 = 100.0;
    pub const BOSS_PATROL_SPEED: f32 = 3.0;
    pub const BOSS_HEALTH_PER_LEVEL: i32 = 500;
    pub const BOSS_SHOOT_PERIOD_TICKS: u32 = 30;
    pub const BOSS_AIMED_OFFSET: f32 = 30.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;
    pub const POWERUP_EXIT_MARGIN: f32 = 20.0;
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;

    /// Damage and scoring
    pub const BULLET_DAMAGE: i32 = 10;
    pub const RAM_DAMAGE: i32 = 20;
    pub const BOSS_SCORE_PER_LEVEL: u64 = 500;
    pub const BOSS_THRESHOLD_PER_LEVEL: u64 = 1000;

    /// Level curve
    pub const MAX_LEVEL: u32 = 10;
    pub const INITIAL_SPAWN_INTERVAL_MS: u64 = 1000;
    pub const MIN_SPAWN_INTERVAL_MS: u64 = 300;
    pub const SPAWN_INTERVAL_STEP_MS: u64 = 50;
    pub const LEVEL_TRANSITION_MS: u64 = 5000;

    /// Explosion sprite sheet
    pub const EXPLOSION_LAST_FRAME: f32 = 7.0;
    pub const EXPLOSION_FRAME_STEP: f32 = 0.5;
    pub const BOSS_EXPLOSION_SCALE: f32 = 2.0;

    /// Background
    pub const STAR_COUNT: usize = 100;
    /// Cosmetic particle cap
    pub const MAX_PARTICLES: usize = 1024;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Unit direction for an angle in degrees (0° = +x, 90° = straight down in screen space)
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_degrees() {
        let down = direction_from_degrees(90.0);
        assert!(down.x.abs() < 1e-6);
        assert!((down.y - 1.0).abs() < 1e-6);

        let left = direction_from_degrees(180.0);
        assert!((left.x + 1.0).abs() < 1e-6);
        assert!((left.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }
}
