//! Rendering adapter
//!
//! The simulation never draws. Each frame the game turns a `GameState`
//! snapshot into a flat list of `DrawCommand`s, back to front, and hands them
//! to whatever `RenderSink` is attached (a real backend, a log, or a `Vec` in tests).

pub mod log_sink;
pub mod palette;

pub use log_sink::LogRenderer;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{BulletOwner, EnemyKind, GameState, HudStats, PowerUpKind};

/// One visible thing to draw this frame
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Star {
        pos: Vec2,
        size: f32,
        color: [f32; 4],
    },
    Particle {
        pos: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Bullet {
        pos: Vec2,
        radius: f32,
        owner: BulletOwner,
        color: [f32; 4],
    },
    Enemy {
        pos: Vec2,
        size: f32,
        kind: EnemyKind,
        color: [f32; 4],
    },
    Boss {
        pos: Vec2,
        size: f32,
        /// Remaining health for the bar, 0.0 - 1.0
        health_fraction: f32,
    },
    PowerUp {
        pos: Vec2,
        size: f32,
        kind: PowerUpKind,
        color: [f32; 4],
    },
    Explosion {
        pos: Vec2,
        /// Sprite sheet index, 0 - 7
        sprite: usize,
        /// Sprite edge length after scaling
        size: f32,
    },
    Player {
        pos: Vec2,
        size: f32,
        /// Draw the shield ring
        shield: bool,
        /// Draw the invincibility overlay this frame
        flash: bool,
    },
    /// Score, bars, power-up labels and banners
    Hud(HudStats),
}

impl DrawCommand {
    /// Short name for logging
    pub fn kind_name(&self) -> &'static str {
        match self {
            DrawCommand::Star { .. } => "star",
            DrawCommand::Particle { .. } => "particle",
            DrawCommand::Bullet { .. } => "bullet",
            DrawCommand::Enemy { .. } => "enemy",
            DrawCommand::Boss { .. } => "boss",
            DrawCommand::PowerUp { .. } => "powerup",
            DrawCommand::Explosion { .. } => "explosion",
            DrawCommand::Player { .. } => "player",
            DrawCommand::Hud(_) => "hud",
        }
    }
}

/// Anything that can consume a frame of draw commands
pub trait RenderSink {
    fn draw(&mut self, command: &DrawCommand);

    /// Called once after the last command of a frame
    fn present(&mut self) {}
}

impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, command: &DrawCommand) {
        self.push(command.clone());
    }
}

/// Whether the invincibility overlay shows at `now_ms`
pub fn invincible_flash_on(now_ms: u64) -> bool {
    now_ms % INVINCIBLE_FLASH_PERIOD_MS < INVINCIBLE_FLASH_PERIOD_MS / 2
}

/// Build the draw list for the current state, back to front.
/// On the game-over screen only the starfield and HUD are drawn.
pub fn build_frame(state: &GameState, now_ms: u64) -> Vec<DrawCommand> {
    let mut frame = Vec::with_capacity(
        state.stars.len()
            + state.particles.len()
            + state.bullets.len()
            + state.enemies.len()
            + state.powerups.len()
            + state.explosions.len()
            + 3,
    );

    frame.extend(state.stars.iter().map(|star| DrawCommand::Star {
        pos: star.pos,
        size: star.size,
        color: palette::star(star.brightness),
    }));

    if state.is_game_over() {
        frame.push(DrawCommand::Hud(state.hud()));
        return frame;
    }

    frame.extend(state.particles.iter().map(|p| DrawCommand::Particle {
        pos: p.pos,
        radius: p.current_size(),
        color: palette::particle(p.color, p.alpha()),
    }));

    frame.extend(state.bullets.iter().map(|b| DrawCommand::Bullet {
        pos: b.pos,
        radius: b.radius,
        owner: b.owner,
        color: palette::bullet(b.owner),
    }));

    frame.extend(state.enemies.iter().map(|e| DrawCommand::Enemy {
        pos: e.pos,
        size: ENEMY_SIZE,
        kind: e.kind,
        color: palette::enemy(e.kind),
    }));

    if let Some(boss) = &state.boss {
        frame.push(DrawCommand::Boss {
            pos: boss.pos,
            size: BOSS_SIZE,
            health_fraction: boss.health_fraction(),
        });
    }

    frame.extend(state.powerups.iter().map(|p| DrawCommand::PowerUp {
        pos: p.pos,
        size: POWERUP_SIZE,
        kind: p.kind,
        color: palette::powerup(p.kind),
    }));

    frame.extend(state.explosions.iter().map(|e| {
        let sprite = e.sprite_index();
        DrawCommand::Explosion {
            pos: e.pos,
            sprite,
            size: (sprite + 1) as f32 * 10.0 * e.scale,
        }
    }));

    let player = &state.player;
    frame.push(DrawCommand::Player {
        pos: player.pos,
        size: PLAYER_SIZE,
        shield: player.shield > 0,
        flash: player.is_invincible() && invincible_flash_on(now_ms),
    });

    frame.push(DrawCommand::Hud(state.hud()));
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Boss, Bullet, Enemy, Explosion, PowerUp};

    fn busy_state() -> GameState {
        let mut state = GameState::new(11, 0);
        state.bullets.push(Bullet::new(
            Vec2::new(100.0, 300.0),
            Vec2::NEG_Y,
            BulletOwner::Player,
        ));
        state.bullets.push(Bullet::new(
            Vec2::new(200.0, 200.0),
            Vec2::Y,
            BulletOwner::Boss,
        ));
        state.enemies.push(Enemy::new(
            EnemyKind::Homing,
            Vec2::new(300.0, 100.0),
            Vec2::new(0.0, 1.0),
        ));
        state.boss = Some(Boss::new(2));
        state
            .powerups
            .push(PowerUp::new(Vec2::new(50.0, 50.0), PowerUpKind::Shield));
        state
            .explosions
            .push(Explosion::new(Vec2::new(10.0, 10.0), BOSS_EXPLOSION_SCALE));
        state
            .particles
            .add(Vec2::new(5.0, 5.0), Vec2::ZERO, [255, 255, 150], 4.0, 10);
        state
    }

    #[test]
    fn test_one_command_per_visible_entity() {
        let state = busy_state();
        let frame = build_frame(&state, 0);
        // stars + particle + 2 bullets + enemy + boss + powerup + explosion + player + hud
        assert_eq!(frame.len(), STAR_COUNT + 9);
    }

    #[test]
    fn test_draw_order() {
        let state = busy_state();
        let frame = build_frame(&state, 0);
        let mut order: Vec<&str> = frame.iter().map(DrawCommand::kind_name).collect();
        order.dedup();
        assert_eq!(
            order,
            vec![
                "star",
                "particle",
                "bullet",
                "enemy",
                "boss",
                "powerup",
                "explosion",
                "player",
                "hud"
            ]
        );
    }

    #[test]
    fn test_game_over_draws_only_stars_and_hud() {
        let mut state = busy_state();
        state.end_game();
        let frame = build_frame(&state, 0);
        assert_eq!(frame.len(), STAR_COUNT + 1);
        match frame.last() {
            Some(DrawCommand::Hud(hud)) => assert!(hud.game_over),
            other => panic!("expected HUD last, got {:?}", other),
        }
    }

    #[test]
    fn test_invincibility_flash_alternates() {
        let mut state = GameState::new(1, 0);
        state.player.invincible_until = Some(5000);

        let flash_at = |now| {
            build_frame(&state, now).iter().any(|c| {
                matches!(c, DrawCommand::Player { flash: true, .. })
            })
        };
        assert!(flash_at(1000));
        assert!(flash_at(1099));
        assert!(!flash_at(1100));
        assert!(!flash_at(1199));
        assert!(flash_at(1200));

        state.player.invincible_until = None;
        assert!(!build_frame(&state, 1000)
            .iter()
            .any(|c| matches!(c, DrawCommand::Player { flash: true, .. })));
    }

    #[test]
    fn test_explosion_sprite_scaling() {
        let mut state = GameState::new(1, 0);
        let mut explosion = Explosion::new(Vec2::ZERO, 1.0);
        explosion.frame = 3.5;
        state.explosions.push(explosion);
        let sprite = build_frame(&state, 0).into_iter().find_map(|c| match c {
            DrawCommand::Explosion { sprite, size, .. } => Some((sprite, size)),
            _ => None,
        });
        assert_eq!(sprite, Some((3, 40.0)));
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<DrawCommand> = Vec::new();
        let state = GameState::new(1, 0);
        for command in build_frame(&state, 0) {
            sink.draw(&command);
        }
        sink.present();
        assert_eq!(sink.len(), STAR_COUNT + 2);
    }
}
