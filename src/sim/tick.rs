//! Fixed timestep simulation tick
//!
//! One call advances the whole game by one step, in a fixed order:
//! spawner, entity updates, collision resolution, then state transitions.

use super::autopilot::autopilot_input;
use super::collision::resolve_collisions;
use super::spawn::{advance_level, spawn_enemies, trigger_boss};
use super::state::{GameEvent, GameState};

/// Held input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire (held, rate-limited by the cooldown)
    pub fire: bool,
    /// Start over, only honored on the game-over screen
    pub restart: bool,
    /// Handled by the frame loop, ignored by the simulation
    pub quit: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one step at simulation time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if state.is_game_over() {
        if input.restart {
            state.restart(now_ms);
        } else {
            // Keep the backdrop alive behind the game-over screen
            state.last_tick_ms = now_ms;
            for star in &mut state.stars {
                star.advance(&mut state.rng);
            }
            state.particles.update();
        }
        return;
    }

    let delta_ms = now_ms.saturating_sub(state.last_tick_ms);
    state.last_tick_ms = now_ms;
    state.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot_input(state)
    } else {
        *input
    };

    // Spawner
    spawn_enemies(state, delta_ms);
    trigger_boss(state);

    // Player
    state.player.update_timers(now_ms);
    state.player.steer(&input);
    if input.fire {
        if let Some(volley) = state.player.try_fire(now_ms) {
            state.bullets.extend(volley);
            state.events.push(GameEvent::Shot);
            let muzzle = state.player.muzzle();
            state.particles.muzzle_flash(&mut state.rng, muzzle);
        }
    }

    // Projectiles
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(|b| !b.is_off_screen());

    let target = state.player.pos;
    if let Some(boss) = state.boss.as_mut() {
        let volley = boss.advance(target);
        for bullet in &volley {
            state.particles.trail(bullet.pos, bullet.dir);
        }
        state.bullets.extend(volley);
    }

    for enemy in &mut state.enemies {
        enemy.advance(target);
    }
    state.enemies.retain(|e| !e.is_off_screen());

    for powerup in &mut state.powerups {
        powerup.advance();
    }
    state.powerups.retain(|p| !p.is_off_screen());

    state.explosions.retain_mut(|e| !e.advance());

    for star in &mut state.stars {
        star.advance(&mut state.rng);
    }
    state.particles.update();

    // Collisions, then transitions
    let result = resolve_collisions(state, now_ms);
    if result.player_defeated {
        state.end_game();
        return;
    }
    advance_level(state, now_ms);
}
