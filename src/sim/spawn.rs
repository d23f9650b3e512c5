//! Spawner and level curve
//!
//! Decides when enemies appear, when a boss encounter starts and when the
//! next level begins.

use rand::Rng;

use super::entity::{Boss, Enemy, EnemyKind};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Spawn interval after a spawn at `level`, floored at the minimum
pub fn spawn_interval_for_level(level: u32) -> u64 {
    INITIAL_SPAWN_INTERVAL_MS
        .saturating_sub(level as u64 * SPAWN_INTERVAL_STEP_MS)
        .max(MIN_SPAWN_INTERVAL_MS)
}

/// Score needed to summon the boss of `level`
pub fn boss_threshold(level: u32) -> u64 {
    level as u64 * BOSS_THRESHOLD_PER_LEVEL
}

/// Accumulate `delta_ms` and spawn one enemy when the interval is reached.
/// Does nothing during a boss encounter.
pub fn spawn_enemies(state: &mut GameState, delta_ms: u64) -> bool {
    if state.boss_fight {
        return false;
    }

    state.spawn_timer_ms += delta_ms;
    if state.spawn_timer_ms < state.spawn_interval_ms {
        return false;
    }
    state.spawn_timer_ms = 0;

    let highest_kind = (state.level.saturating_sub(1)).min(2);
    let kind = EnemyKind::from_index(state.rng.random_range(0..=highest_kind));
    let enemy = Enemy::spawn(kind, &mut state.rng);
    log::trace!("Spawned {:?} at x={:.0}", enemy.kind, enemy.pos.x);
    state.enemies.push(enemy);

    state.spawn_interval_ms = spawn_interval_for_level(state.level);
    true
}

/// Start a boss encounter once the score crosses this level's threshold
pub fn trigger_boss(state: &mut GameState) -> bool {
    if state.boss_fight || state.boss_killed || state.victory {
        return false;
    }
    if state.score < boss_threshold(state.level) {
        return false;
    }

    state.enemies.clear();
    state.boss_fight = true;
    state.boss = Some(Boss::new(state.level));
    state.events.push(GameEvent::BossSpawned { level: state.level });
    log::info!("Boss incoming at level {} (score {})", state.level, state.score);
    true
}

/// After the post-kill grace period, move on to the next level (or declare victory)
pub fn advance_level(state: &mut GameState, now_ms: u64) -> bool {
    if !state.boss_killed || state.victory {
        return false;
    }
    let Some(killed_at) = state.level_transition_at else {
        return false;
    };
    if now_ms.saturating_sub(killed_at) < LEVEL_TRANSITION_MS {
        return false;
    }

    state.level_transition_at = None;
    if state.level >= MAX_LEVEL {
        state.victory = true;
        state.events.push(GameEvent::Victory);
        log::info!("Final boss defeated, galaxy saved with score {}", state.score);
        return false;
    }

    state.level += 1;
    state.boss_killed = false;
    state.events.push(GameEvent::LevelUp { level: state.level });
    log::info!("Level {} begins", state.level);
    true
}
