//! Idle/demo mode - the ship flies itself
//!
//! Produces the same `TickInput` a human would, so the rest of the simulation
//! can't tell the difference.

use std::cmp::Ordering;

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;
use crate::distance;

/// Anything closer than this is worth dodging
const DANGER_RADIUS: f32 = 110.0;
/// Horizontal slack before the ship bothers to move
const DEAD_ZONE: f32 = 4.0;

/// Synthesize input for the current state
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    let nearest = |points: &mut dyn Iterator<Item = Vec2>| {
        points.min_by(|a, b| {
            distance(*a, player)
                .partial_cmp(&distance(*b, player))
                .unwrap_or(Ordering::Equal)
        })
    };

    // Only rammers hurt; boss bullets pass through the ship
    let danger = nearest(
        &mut state
            .enemies
            .iter()
            .map(|e| e.pos)
            .filter(|p| distance(*p, player) < DANGER_RADIUS),
    );

    let target_x = if let Some(threat) = danger {
        // Sidestep away from the threat, toward open space
        let away = if threat.x >= player.x { -1.0 } else { 1.0 };
        let side = if player.x < PLAYER_SIZE * 2.0 {
            1.0
        } else if player.x > WIDTH - PLAYER_SIZE * 2.0 {
            -1.0
        } else {
            away
        };
        player.x + side * DANGER_RADIUS
    } else if let Some(pickup) = nearest(&mut state.powerups.iter().map(|p| p.pos)) {
        pickup.x
    } else if let Some(boss) = &state.boss {
        boss.pos.x
    } else if let Some(enemy) = state
        .enemies
        .iter()
        .filter(|e| e.pos.y < player.y)
        .max_by(|a, b| a.pos.y.partial_cmp(&b.pos.y).unwrap_or(Ordering::Equal))
    {
        // Lowest enemy is the most urgent
        enemy.pos.x
    } else {
        WIDTH / 2.0
    };

    input.left = target_x < player.x - DEAD_ZONE;
    input.right = target_x > player.x + DEAD_ZONE;

    // Hold a cruising line near the bottom
    input.up = player.y > PLAYER_START_Y + DEAD_ZONE;
    input.down = player.y < PLAYER_START_Y - DEAD_ZONE;

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Bullet, BulletOwner, Enemy, EnemyKind, PowerUp, PowerUpKind};

    #[test]
    fn test_autopilot_always_fires() {
        let state = GameState::new(5, 0);
        let input = autopilot_input(&state);
        assert!(input.fire);
        assert!(!input.restart && !input.quit);
    }

    #[test]
    fn test_autopilot_chases_powerup() {
        let mut state = GameState::new(5, 0);
        state.player.pos = Vec2::new(400.0, PLAYER_START_Y);
        state
            .powerups
            .push(PowerUp::new(Vec2::new(100.0, 200.0), PowerUpKind::Rapid));
        let input = autopilot_input(&state);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_autopilot_dodges_close_enemy() {
        let mut state = GameState::new(5, 0);
        state.player.pos = Vec2::new(400.0, PLAYER_START_Y);
        state.enemies.push(Enemy::new(
            EnemyKind::Straight,
            Vec2::new(420.0, PLAYER_START_Y - 60.0),
            Vec2::new(0.0, 2.0),
        ));
        let input = autopilot_input(&state);
        assert!(input.left);
    }

    #[test]
    fn test_autopilot_ignores_boss_bullets() {
        let mut state = GameState::new(5, 0);
        state.player.pos = Vec2::new(400.0, PLAYER_START_Y);
        state.bullets.push(Bullet::new(
            Vec2::new(410.0, PLAYER_START_Y - 40.0),
            Vec2::Y,
            BulletOwner::Boss,
        ));
        let input = autopilot_input(&state);
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_autopilot_returns_to_cruising_line() {
        let mut state = GameState::new(5, 0);
        state.player.pos = Vec2::new(400.0, 200.0);
        let input = autopilot_input(&state);
        assert!(input.down);
        assert!(!input.up);
    }
}
