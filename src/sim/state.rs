//! Game state and session bookkeeping
//!
//! `GameState` is the single aggregate the frame loop owns and hands to every
//! simulation step. Nothing in the simulation reaches for global state.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Boss, Bullet, Enemy, Explosion, ParticleSystem, Player, PowerUp, PowerUpKind, Star};
use crate::consts::*;

/// Top-level mode. Boss fights and level transitions are flags layered over `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for restart
    GameOver,
}

/// Things that happened during a tick. Drained by the frame loop for audio and logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player fired a batch of bullets
    Shot,
    /// Enemy destroyed by gunfire
    EnemyDestroyed { score: u64 },
    /// Enemy crashed into the player
    EnemyRammed,
    /// Player lost a life and respawned with invincibility
    LifeLost { lives_left: u32 },
    PowerUpDropped(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    BossSpawned { level: u32 },
    BossDefeated { level: u32 },
    LevelUp { level: u32 },
    Victory,
    GameOver { score: u64 },
    Restarted,
}

/// Knobs the simulation takes from configuration (visual only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub star_count: usize,
    pub max_particles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            max_particles: MAX_PARTICLES,
        }
    }
}

/// Session stats for HUD rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub health: i32,
    pub shield: i32,
    pub rapid_fire: bool,
    pub multi_shot: bool,
    pub invincible: bool,
    pub game_over: bool,
    /// "Level complete" banner is showing
    pub boss_killed: bool,
    pub victory: bool,
    /// Boss health bar, `None` outside a boss fight
    pub boss_health_fraction: Option<f32>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: SimConfig,
    /// Number of restarts so far (varies the RNG stream per run)
    pub restarts: u32,
    pub phase: GamePhase,
    pub score: u64,
    pub level: u32,
    pub boss_fight: bool,
    /// Set from boss kill until the next level begins
    pub boss_killed: bool,
    /// Final boss defeated
    pub victory: bool,
    /// Timestamp of the last boss kill
    pub level_transition_at: Option<u64>,
    /// Milliseconds accumulated toward the next enemy spawn
    pub spawn_timer_ms: u64,
    pub spawn_interval_ms: u64,
    /// Timestamp of the previous tick
    pub last_tick_ms: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Player and boss projectiles, tagged by owner
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub stars: Vec<Star>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed, starting at `now_ms`
    pub fn new(seed: u64, now_ms: u64) -> Self {
        Self::with_config(seed, now_ms, SimConfig::default())
    }

    pub fn with_config(seed: u64, now_ms: u64, config: SimConfig) -> Self {
        Self::fresh(seed, 0, now_ms, config)
    }

    fn fresh(seed: u64, restarts: u32, now_ms: u64, config: SimConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(restarts as u64));
        let stars = (0..config.star_count).map(|_| Star::random(&mut rng)).collect();

        Self {
            seed,
            rng,
            config,
            restarts,
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            boss_fight: false,
            boss_killed: false,
            victory: false,
            level_transition_at: None,
            spawn_timer_ms: 0,
            spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            last_tick_ms: now_ms,
            time_ticks: 0,
            player: Player::default(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            powerups: Vec::new(),
            explosions: Vec::new(),
            particles: ParticleSystem::new(config.max_particles),
            stars,
            events: Vec::new(),
        }
    }

    /// Throw away the session and start over from scratch
    pub fn restart(&mut self, now_ms: u64) {
        let final_score = self.score;
        *self = Self::fresh(self.seed, self.restarts + 1, now_ms, self.config);
        self.events.push(GameEvent::Restarted);
        log::info!("Restarted (previous score {})", final_score);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Enter `GameOver`. Idempotent.
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!("Game over at level {} with score {}", self.level, self.score);
    }

    pub fn hud(&self) -> HudStats {
        HudStats {
            score: self.score,
            level: self.level,
            lives: self.player.lives,
            health: self.player.health,
            shield: self.player.shield,
            rapid_fire: self.player.rapid_fire(),
            multi_shot: self.player.multi_shot(),
            invincible: self.player.is_invincible(),
            game_over: self.is_game_over(),
            boss_killed: self.boss_killed,
            victory: self.victory,
            boss_health_fraction: self.boss.as_ref().map(Boss::health_fraction),
        }
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
