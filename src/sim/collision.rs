//! Collision detection and resolution
//!
//! Every pass marks what it consumes and compacts the collections afterwards,
//! so no entity is skipped or processed twice within a pass.
//!
//! Resolution order per tick:
//! 1. enemy ↔ player (ramming)
//! 2. enemy ↔ player bullets
//! 3. boss ↔ player bullets
//! 4. power-up pickup
//!
//! Boss bullets are never tested against anything.

use glam::Vec2;
use rand::Rng;

use super::entity::{
    BOSS_DEBRIS, BulletOwner, ENEMY_DEBRIS, Explosion, PICKUP_SPARKLE, PowerUp, PowerUpKind,
};
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::distance;

/// Outcome of a collision pass that the state machine needs to act on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// The player ran out of lives this tick
    pub player_defeated: bool,
    pub enemies_destroyed: u32,
    pub boss_destroyed: bool,
}

/// Circle overlap test (strict)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}

/// Run every collision pass in order
pub fn resolve_collisions(state: &mut GameState, now_ms: u64) -> CollisionResult {
    let mut result = CollisionResult::default();

    result.player_defeated |= enemies_vs_player(state, now_ms);
    result.enemies_destroyed = enemies_vs_bullets(state);
    result.boss_destroyed = boss_vs_bullets(state, now_ms);
    collect_powerups(state, now_ms);

    result
}

/// Drop every element whose flag is set, preserving order
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    debug_assert_eq!(items.len(), removed.len());
    let mut index = 0;
    items.retain(|_| {
        let keep = !removed[index];
        index += 1;
        keep
    });
}

/// Damage the player, reporting a lost life. Returns true when no lives remain.
fn damage_player(state: &mut GameState, damage: i32, now_ms: u64) -> bool {
    let lives_before = state.player.lives;
    let defeated = state.player.hit(damage, now_ms);
    if state.player.lives < lives_before {
        state.events.push(GameEvent::LifeLost {
            lives_left: state.player.lives,
        });
        log::info!("Life lost, {} remaining", state.player.lives);
    }
    defeated
}

/// Enemies touching the player deal fixed damage and always blow up
fn enemies_vs_player(state: &mut GameState, now_ms: u64) -> bool {
    let player_pos = state.player.pos;
    let player_radius = PLAYER_SIZE / 2.0;

    let rammed: Vec<bool> = state
        .enemies
        .iter()
        .map(|e| circles_overlap(e.pos, e.radius(), player_pos, player_radius))
        .collect();
    if !rammed.contains(&true) {
        return false;
    }

    let mut defeated = false;
    for (index, _) in rammed.iter().enumerate().filter(|(_, hit)| **hit) {
        let pos = state.enemies[index].pos;
        defeated |= damage_player(state, RAM_DAMAGE, now_ms);
        state.explosions.push(Explosion::new(pos, 1.0));
        state.events.push(GameEvent::EnemyRammed);
    }
    compact(&mut state.enemies, &rammed);
    defeated
}

/// Each enemy consumes the first live player bullet overlapping it
fn enemies_vs_bullets(state: &mut GameState) -> u32 {
    let GameState {
        enemies,
        bullets,
        rng,
        particles,
        explosions,
        powerups,
        events,
        score,
        ..
    } = state;

    let mut spent = vec![false; bullets.len()];
    let mut dead = vec![false; enemies.len()];
    let mut destroyed = 0;

    for (enemy_index, enemy) in enemies.iter_mut().enumerate() {
        let hit = bullets.iter().enumerate().position(|(bullet_index, bullet)| {
            !spent[bullet_index]
                && bullet.owner == BulletOwner::Player
                && circles_overlap(enemy.pos, enemy.radius(), bullet.pos, bullet.radius)
        });
        let Some(bullet_index) = hit else {
            continue;
        };
        spent[bullet_index] = true;

        if !enemy.take_damage(BULLET_DAMAGE) {
            continue;
        }
        dead[enemy_index] = true;
        destroyed += 1;

        let value = enemy.score_value();
        *score += value;
        explosions.push(Explosion::new(enemy.pos, 1.0));
        if rng.random_bool(POWERUP_DROP_CHANCE) {
            let kind = PowerUpKind::random(rng);
            powerups.push(PowerUp::new(enemy.pos, kind));
            events.push(GameEvent::PowerUpDropped(kind));
        }
        particles.burst(rng, enemy.pos, 10, &ENEMY_DEBRIS);
        events.push(GameEvent::EnemyDestroyed { score: value });
    }

    compact(bullets, &spent);
    compact(enemies, &dead);
    destroyed
}

/// Player bullets inside the boss's box damage it until it dies
fn boss_vs_bullets(state: &mut GameState, now_ms: u64) -> bool {
    let Some(boss) = state.boss.as_mut() else {
        return false;
    };

    let mut spent = vec![false; state.bullets.len()];
    let mut killed = false;
    for (index, bullet) in state.bullets.iter().enumerate() {
        if bullet.owner != BulletOwner::Player || !boss.contains(bullet.pos) {
            continue;
        }
        spent[index] = true;
        if boss.take_damage(BULLET_DAMAGE) {
            killed = true;
            break;
        }
    }
    let boss_pos = boss.pos;
    compact(&mut state.bullets, &spent);

    if !killed {
        return false;
    }

    let level = state.level;
    state.score += level as u64 * BOSS_SCORE_PER_LEVEL;
    state.boss = None;
    state.boss_fight = false;
    state.boss_killed = true;
    state.level_transition_at = Some(now_ms);
    state
        .explosions
        .push(Explosion::new(boss_pos, BOSS_EXPLOSION_SCALE));
    state
        .particles
        .burst(&mut state.rng, boss_pos, 50, &BOSS_DEBRIS);
    state.events.push(GameEvent::BossDefeated { level });
    log::info!("Boss of level {} destroyed, score {}", level, state.score);
    true
}

/// Touching a power-up applies it immediately
fn collect_powerups(state: &mut GameState, now_ms: u64) {
    let player_pos = state.player.pos;
    let reach = (POWERUP_SIZE + PLAYER_SIZE) / 2.0;

    let taken: Vec<bool> = state
        .powerups
        .iter()
        .map(|p| distance(p.pos, player_pos) < reach)
        .collect();

    for (index, _) in taken.iter().enumerate().filter(|(_, hit)| **hit) {
        let kind = state.powerups[index].kind;
        state.player.apply_powerup(kind, now_ms);
        state
            .particles
            .burst(&mut state.rng, player_pos, 20, &PICKUP_SPARKLE);
        state.events.push(GameEvent::PowerUpCollected(kind));
        log::debug!("Collected {:?}", kind);
    }
    compact(&mut state.powerups, &taken);
}
