//! Colors for game elements (linear RGBA, 0.0 - 1.0)

use crate::sim::{BulletOwner, EnemyKind, PowerUpKind};

/// 8-bit RGBA to float RGBA
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

pub const PLAYER_BULLET: [f32; 4] = rgba(255, 255, 255, 255);
pub const BOSS_BULLET: [f32; 4] = rgba(255, 100, 100, 255);

pub const ENEMY_STRAIGHT: [f32; 4] = rgba(255, 0, 0, 255);
pub const ENEMY_ZIGZAG: [f32; 4] = rgba(0, 255, 0, 255);
pub const ENEMY_HOMING: [f32; 4] = rgba(255, 255, 0, 255);

pub const POWERUP_SHIELD: [f32; 4] = rgba(0, 150, 255, 255);
pub const POWERUP_RAPID: [f32; 4] = rgba(255, 255, 0, 255);
pub const POWERUP_MULTI: [f32; 4] = rgba(0, 255, 0, 255);

pub fn bullet(owner: BulletOwner) -> [f32; 4] {
    match owner {
        BulletOwner::Player => PLAYER_BULLET,
        BulletOwner::Boss => BOSS_BULLET,
    }
}

pub fn enemy(kind: EnemyKind) -> [f32; 4] {
    match kind {
        EnemyKind::Straight => ENEMY_STRAIGHT,
        EnemyKind::Zigzag { .. } => ENEMY_ZIGZAG,
        EnemyKind::Homing => ENEMY_HOMING,
    }
}

pub fn powerup(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Shield => POWERUP_SHIELD,
        PowerUpKind::Rapid => POWERUP_RAPID,
        PowerUpKind::Multi => POWERUP_MULTI,
    }
}

/// Gray level for a star of the given brightness
pub fn star(brightness: u8) -> [f32; 4] {
    rgba(brightness, brightness, brightness, 255)
}

/// Particle color with its fade applied
pub fn particle(color: [u8; 3], alpha: f32) -> [f32; 4] {
    let [r, g, b, _] = rgba(color[0], color[1], color[2], 255);
    [r, g, b, alpha.clamp(0.0, 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_conversion() {
        assert_eq!(rgba(255, 0, 255, 255), [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(star(255), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_enemy_colors_distinct() {
        let a = enemy(EnemyKind::Straight);
        let b = enemy(EnemyKind::Zigzag { ticks: 12 });
        let c = enemy(EnemyKind::Homing);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_particle_alpha_clamped() {
        assert_eq!(particle([255, 255, 255], 1.5)[3], 1.0);
        assert_eq!(particle([255, 255, 255], -0.5)[3], 0.0);
    }
}
