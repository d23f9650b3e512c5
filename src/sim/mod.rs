//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestamps only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (insertion order, removal by compaction)
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{CollisionResult, circles_overlap, resolve_collisions};
pub use entity::{
    Boss, BossPattern, Bullet, BulletOwner, Enemy, EnemyKind, Explosion, Particle,
    ParticleSystem, Player, PowerUp, PowerUpKind, Star,
};
pub use spawn::{advance_level, boss_threshold, spawn_enemies, spawn_interval_for_level, trigger_boss};
pub use state::{GameEvent, GamePhase, GameState, HudStats, SimConfig};
pub use tick::{TickInput, tick};
