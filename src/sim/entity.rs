//! Entity models and their per-frame behavior
//!
//! Everything here is plain simulation data plus the logic that advances it
//! by one fixed tick. Drawing is the renderer's job.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::consts::*;
use crate::direction_from_degrees;

/// Who fired a projectile. Decides which collision rules apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Boss,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: Vec2, owner: BulletOwner) -> Self {
        let (speed, fallback) = match owner {
            BulletOwner::Player => (BULLET_SPEED, Vec2::NEG_Y),
            BulletOwner::Boss => (BOSS_BULLET_SPEED, Vec2::Y),
        };
        Self {
            pos,
            dir: dir.try_normalize().unwrap_or(fallback),
            speed,
            radius: BULLET_RADIUS,
            owner,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x < -BULLET_MARGIN
            || self.pos.x > WIDTH + BULLET_MARGIN
            || self.pos.y < -BULLET_MARGIN
            || self.pos.y > HEIGHT + BULLET_MARGIN
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Velocity derived from input this tick
    pub vel: Vec2,
    pub health: i32,
    pub lives: u32,
    pub shield: i32,
    /// Rapid-fire expiry (absolute ms), `None` when inactive
    pub rapid_fire_until: Option<u64>,
    /// Multi-shot expiry (absolute ms), `None` when inactive
    pub multi_shot_until: Option<u64>,
    /// Invincibility expiry (absolute ms), `None` when inactive
    pub invincible_until: Option<u64>,
    pub last_fire_ms: Option<u64>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(WIDTH / 2.0, PLAYER_START_Y),
            vel: Vec2::ZERO,
            health: PLAYER_MAX_HEALTH,
            lives: PLAYER_START_LIVES,
            shield: 0,
            rapid_fire_until: None,
            multi_shot_until: None,
            invincible_until: None,
            last_fire_ms: None,
        }
    }
}

impl Player {
    pub fn rapid_fire(&self) -> bool {
        self.rapid_fire_until.is_some()
    }

    pub fn multi_shot(&self) -> bool {
        self.multi_shot_until.is_some()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_until.is_some()
    }

    /// Drop every timed effect whose expiry has been reached. Each one is independent.
    pub fn update_timers(&mut self, now_ms: u64) {
        for timer in [
            &mut self.rapid_fire_until,
            &mut self.multi_shot_until,
            &mut self.invincible_until,
        ] {
            if timer.is_some_and(|until| now_ms >= until) {
                *timer = None;
            }
        }
    }

    /// Set velocity from held directions and move, clamped to the playfield
    pub fn steer(&mut self, input: &TickInput) {
        let mut vel = Vec2::ZERO;
        if input.left {
            vel.x -= PLAYER_SPEED;
        }
        if input.right {
            vel.x += PLAYER_SPEED;
        }
        if input.up {
            vel.y -= PLAYER_SPEED;
        }
        if input.down {
            vel.y += PLAYER_SPEED;
        }
        if vel.x != 0.0 && vel.y != 0.0 {
            vel *= std::f32::consts::FRAC_1_SQRT_2;
        }

        let half = PLAYER_SIZE / 2.0;
        self.vel = vel;
        self.pos = (self.pos + vel).clamp(
            Vec2::splat(half),
            Vec2::new(WIDTH - half, HEIGHT - half),
        );
    }

    pub fn fire_cooldown_ms(&self) -> u64 {
        if self.rapid_fire() {
            RAPID_FIRE_COOLDOWN_MS
        } else {
            FIRE_COOLDOWN_MS
        }
    }

    /// Fire if the cooldown has elapsed. Returns the batch of new bullets.
    pub fn try_fire(&mut self, now_ms: u64) -> Option<Vec<Bullet>> {
        if let Some(last) = self.last_fire_ms {
            if now_ms.saturating_sub(last) <= self.fire_cooldown_ms() {
                return None;
            }
        }
        self.last_fire_ms = Some(now_ms);
        Some(self.volley())
    }

    /// Muzzle position at the ship's nose
    pub fn muzzle(&self) -> Vec2 {
        self.pos - Vec2::new(0.0, PLAYER_SIZE / 2.0)
    }

    fn volley(&self) -> Vec<Bullet> {
        let muzzle = self.muzzle();
        let straight = Bullet::new(muzzle, Vec2::NEG_Y, BulletOwner::Player);
        if !self.multi_shot() {
            return vec![straight];
        }
        vec![
            straight,
            Bullet::new(
                muzzle - Vec2::new(10.0, 0.0),
                Vec2::new(-0.3, -0.7),
                BulletOwner::Player,
            ),
            Bullet::new(
                muzzle + Vec2::new(10.0, 0.0),
                Vec2::new(0.3, -0.7),
                BulletOwner::Player,
            ),
        ]
    }

    /// Apply damage. Returns true when the last life is gone.
    pub fn hit(&mut self, damage: i32, now_ms: u64) -> bool {
        if self.is_invincible() {
            return false;
        }

        if self.shield > 0 {
            self.shield = (self.shield - damage).clamp(0, PLAYER_MAX_SHIELD);
            return false;
        }

        self.health = (self.health - damage).clamp(0, PLAYER_MAX_HEALTH);
        if self.health > 0 {
            return false;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.health = PLAYER_MAX_HEALTH;
            self.invincible_until = Some(now_ms + INVINCIBILITY_MS);
        }
        self.lives == 0
    }

    pub fn apply_powerup(&mut self, kind: PowerUpKind, now_ms: u64) {
        match kind {
            PowerUpKind::Shield => self.shield = PLAYER_MAX_SHIELD,
            PowerUpKind::Rapid => self.rapid_fire_until = Some(now_ms + RAPID_FIRE_MS),
            PowerUpKind::Multi => self.multi_shot_until = Some(now_ms + MULTI_SHOT_MS),
        }
    }
}

/// Enemy behavior family. The variant index doubles as the visual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Constant downward drift
    Straight,
    /// Flips horizontal direction on a fixed period
    Zigzag { ticks: u32 },
    /// Steers toward the player's x
    Homing,
}

impl EnemyKind {
    pub fn from_index(index: u32) -> Self {
        debug_assert!(index <= 2, "enemy type {index} out of range");
        match index {
            0 => EnemyKind::Straight,
            1 => EnemyKind::Zigzag { ticks: 0 },
            _ => EnemyKind::Homing,
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            EnemyKind::Straight => 0,
            EnemyKind::Zigzag { .. } => 1,
            EnemyKind::Homing => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            health: 10 + 10 * kind.index() as i32,
            kind,
        }
    }

    /// Create an enemy just above the top edge with kind-specific randomized velocity
    pub fn spawn(kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let x = rng.random_range(ENEMY_SIZE..=WIDTH - ENEMY_SIZE);
        let vel = match kind {
            EnemyKind::Straight => Vec2::new(0.0, rng.random_range(2.0..3.0)),
            EnemyKind::Zigzag { .. } => {
                let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                Vec2::new(
                    side * rng.random_range(1.0..2.0),
                    rng.random_range(1.5..2.5),
                )
            }
            EnemyKind::Homing => Vec2::new(0.0, rng.random_range(1.0..2.0)),
        };
        Self::new(kind, Vec2::new(x, -ENEMY_SIZE), vel)
    }

    pub fn advance(&mut self, target: Vec2) {
        match &mut self.kind {
            EnemyKind::Straight => {}
            EnemyKind::Zigzag { ticks } => {
                *ticks += 1;
                if *ticks >= ZIGZAG_PERIOD_TICKS {
                    self.vel.x = -self.vel.x;
                    *ticks = 0;
                }
            }
            EnemyKind::Homing => {
                self.vel.x = if target.x > self.pos.x {
                    (self.vel.x + HOMING_NUDGE).min(HOMING_MAX_DX)
                } else {
                    (self.vel.x - HOMING_NUDGE).max(-HOMING_MAX_DX)
                };
            }
        }

        if self.pos.x < ENEMY_SIZE || self.pos.x > WIDTH - ENEMY_SIZE {
            self.vel.x = -self.vel.x;
        }

        self.pos += self.vel;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > HEIGHT + ENEMY_EXIT_MARGIN
    }

    pub fn radius(&self) -> f32 {
        ENEMY_SIZE / 2.0
    }

    /// Returns true if this hit destroyed the enemy
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.health <= 0
    }

    pub fn score_value(&self) -> u64 {
        (self.kind.index() as u64 + 1) * 10
    }
}

/// Boss volley shapes, cycled on a fixed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPattern {
    Spread,
    Aimed,
    Spiral,
}

impl BossPattern {
    pub fn next(self) -> Self {
        match self {
            BossPattern::Spread => BossPattern::Aimed,
            BossPattern::Aimed => BossPattern::Spiral,
            BossPattern::Spiral => BossPattern::Spread,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub pattern: BossPattern,
    /// Ticks since the last volley
    pub shoot_timer: u32,
    /// Ticks spent patrolling (drives spiral rotation)
    pub patrol_ticks: u32,
}

impl Boss {
    pub fn new(level: u32) -> Self {
        let health = BOSS_HEALTH_PER_LEVEL * level as i32;
        Self {
            pos: Vec2::new(WIDTH / 2.0, -BOSS_SIZE),
            vel: Vec2::new(BOSS_PATROL_SPEED, 0.0),
            health,
            max_health: health,
            level,
            pattern: BossPattern::Spread,
            shoot_timer: 0,
            patrol_ticks: 0,
        }
    }

    pub fn is_entering(&self) -> bool {
        self.pos.y < BOSS_HOLD_Y
    }

    /// Advance one tick, returning the volley fired this tick (usually empty)
    pub fn advance(&mut self, target: Vec2) -> Vec<Bullet> {
        if self.is_entering() {
            self.pos.y += 1.0;
            return Vec::new();
        }

        let half = BOSS_SIZE / 2.0;
        self.pos.x += self.vel.x;
        if self.pos.x < half || self.pos.x > WIDTH - half {
            self.vel.x = -self.vel.x;
        }

        self.patrol_ticks = self.patrol_ticks.wrapping_add(1);
        self.shoot_timer += 1;
        if self.shoot_timer < BOSS_SHOOT_PERIOD_TICKS {
            return Vec::new();
        }

        self.shoot_timer = 0;
        let volley = self.volley(target);
        self.pattern = self.pattern.next();
        volley
    }

    /// Bullets for the current pattern, fired from the boss's lower edge
    pub fn volley(&self, target: Vec2) -> Vec<Bullet> {
        let origin = self.pos + Vec2::new(0.0, BOSS_SIZE / 2.0);
        let boss_shot = |pos: Vec2, dir: Vec2| Bullet::new(pos, dir, BulletOwner::Boss);

        match self.pattern {
            BossPattern::Spread => (-60..=60)
                .step_by(20)
                .map(|angle| boss_shot(origin, direction_from_degrees(angle as f32 + 90.0)))
                .collect(),
            BossPattern::Aimed => {
                let dir = (target - self.pos).try_normalize().unwrap_or(Vec2::Y);
                [-BOSS_AIMED_OFFSET, 0.0, BOSS_AIMED_OFFSET]
                    .into_iter()
                    .map(|dx| boss_shot(origin + Vec2::new(dx, 0.0), dir))
                    .collect()
            }
            BossPattern::Spiral => (0..8u32)
                .map(|i| {
                    let angle = ((self.patrol_ticks % 36) * 10 + i * 45) % 360;
                    boss_shot(origin, direction_from_degrees(angle as f32))
                })
                .collect(),
        }
    }

    /// Axis-aligned containment test (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let half = BOSS_SIZE / 2.0;
        (self.pos.x - half..=self.pos.x + half).contains(&point.x)
            && (self.pos.y - half..=self.pos.y + half).contains(&point.y)
    }

    /// Returns true if this hit destroyed the boss
    pub fn take_damage(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.health <= 0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Rapid,
    Multi,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Rapid, PowerUpKind::Multi];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
            kind,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > HEIGHT + POWERUP_EXIT_MARGIN
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Animation frame (fractional)
    pub frame: f32,
    pub scale: f32,
}

impl Explosion {
    pub fn new(pos: Vec2, scale: f32) -> Self {
        Self {
            pos,
            frame: 0.0,
            scale,
        }
    }

    /// Step the animation. Returns true once it has played out.
    pub fn advance(&mut self) -> bool {
        self.frame += EXPLOSION_FRAME_STEP;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.frame > EXPLOSION_LAST_FRAME
    }

    pub fn sprite_index(&self) -> usize {
        self.frame.min(EXPLOSION_LAST_FRAME).floor() as usize
    }
}

/// A cosmetic particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [u8; 3],
    pub size: f32,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
}

impl Particle {
    /// Remaining life as a fraction of the original (drives fade and shrink)
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    pub fn alpha(&self) -> f32 {
        self.life_fraction()
    }

    pub fn current_size(&self) -> f32 {
        self.size * self.life_fraction()
    }
}

/// Shape of a radial particle burst
#[derive(Debug, Clone, Copy)]
pub struct BurstStyle {
    pub color: [u8; 3],
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub life: (u32, u32),
}

pub const BOSS_TRAIL_COLOR: [u8; 3] = [255, 100, 100];

pub const ENEMY_DEBRIS: BurstStyle = BurstStyle {
    color: [255, 200, 50],
    speed: (1.0, 3.0),
    size: (2.0, 5.0),
    life: (20, 40),
};

pub const BOSS_DEBRIS: BurstStyle = BurstStyle {
    color: [255, 100, 50],
    speed: (1.0, 5.0),
    size: (3.0, 8.0),
    life: (30, 60),
};

pub const PICKUP_SPARKLE: BurstStyle = BurstStyle {
    color: [100, 255, 100],
    speed: (1.0, 3.0),
    size: (2.0, 5.0),
    life: (20, 40),
};

/// Owner of all live particles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub capacity: usize,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::new(),
            capacity,
        }
    }

    /// Add a particle unless the system is full. Zero-life particles are ignored.
    pub fn add(&mut self, pos: Vec2, vel: Vec2, color: [u8; 3], size: f32, life: u32) {
        if life == 0 || self.particles.len() >= self.capacity {
            return;
        }
        self.particles.push(Particle {
            pos,
            vel,
            color,
            size,
            life,
            max_life: life,
        });
    }

    /// Emit `count` particles flying out from `pos` in random directions
    pub fn burst(&mut self, rng: &mut impl Rng, pos: Vec2, count: usize, style: &BurstStyle) {
        for _ in 0..count {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(style.speed.0..style.speed.1);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let size = rng.random_range(style.size.0..style.size.1);
            let life = rng.random_range(style.life.0..=style.life.1);
            self.add(pos, vel, style.color, size, life);
        }
    }

    /// Short upward spray at a gun muzzle
    pub fn muzzle_flash(&mut self, rng: &mut impl Rng, pos: Vec2) {
        for _ in 0..5 {
            let vel = Vec2::new(rng.random_range(-1.0..1.0), rng.random_range(-2.0..0.0));
            let size = rng.random_range(2.0..5.0);
            let life = rng.random_range(10..=20);
            self.add(pos, vel, [255, 255, 150], size, life);
        }
    }

    /// Single fading puff behind a freshly fired boss bullet
    pub fn trail(&mut self, pos: Vec2, dir: Vec2) {
        self.add(pos, dir * 0.5, BOSS_TRAIL_COLOR, 3.0, 10);
    }

    /// Move every particle, age it by one tick and prune the dead
    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

/// Background parallax star (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    pub brightness: u8,
}

impl Star {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(rng.random_range(0.0..=WIDTH), rng.random_range(0.0..=HEIGHT)),
            speed: rng.random_range(0.1..1.0),
            size: rng.random_range(0.5..2.0),
            brightness: rng.random_range(100..=255),
        }
    }

    /// Drift down, wrapping to the top at a new random column
    pub fn advance(&mut self, rng: &mut impl Rng) {
        self.pos.y += self.speed;
        if self.pos.y > HEIGHT {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..=WIDTH);
        }
    }
}
