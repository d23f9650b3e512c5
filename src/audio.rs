//! Sound cues
//!
//! The simulation never plays sounds itself. It raises `GameEvent`s and the
//! frame loop turns them into cues here. Playback is fire-and-forget through
//! an `AudioBackend`, so a missing or failing device never stalls a frame.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy or boss destroyed, or an enemy rammed the player
    Explosion,
    /// Power-up collected
    PowerUp,
}

impl SoundEffect {
    /// Per-cue mix level before master/sfx scaling
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.2,
            SoundEffect::Explosion => 0.3,
            SoundEffect::PowerUp => 0.4,
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed { .. }
            | GameEvent::EnemyRammed
            | GameEvent::BossDefeated { .. } => Some(SoundEffect::Explosion),
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            _ => None,
        }
    }
}

/// Something that can make noise
pub trait AudioBackend {
    /// Start playing `effect` at `volume` (0.0 - 1.0). Must not block.
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend for headless runs: cues go to the debug log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioBackend for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play the cue for every event that has one. Returns how many were played.
    pub fn handle_events(&mut self, events: &[GameEvent]) -> usize {
        if self.effective_volume() <= 0.0 {
            return 0;
        }
        let mut played = 0;
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
            played += 1;
        }
        played
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUpKind;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Shot), Some(SoundEffect::Shoot));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyDestroyed { score: 10 }),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyRammed),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BossDefeated { level: 2 }),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected(PowerUpKind::Multi)),
            Some(SoundEffect::PowerUp)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::LevelUp { level: 3 }), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpDropped(PowerUpKind::Shield)),
            None
        );
    }

    #[test]
    fn test_volume_scaling() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(1.0);
        audio.play(SoundEffect::PowerUp);

        let (effect, vol) = audio.backend().0[0];
        assert_eq!(effect, SoundEffect::PowerUp);
        assert!((vol - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        audio.play(SoundEffect::Shoot);
        assert!(audio.backend().0.is_empty());

        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Shoot);
        let (_, vol) = audio.backend().0[0];
        assert!((vol - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let mut audio = AudioManager::new(Recorder::default());
        audio.set_muted(true);
        let played = audio.handle_events(&[GameEvent::Shot, GameEvent::EnemyRammed]);
        assert_eq!(played, 0);
        assert!(audio.backend().0.is_empty());
    }

    #[test]
    fn test_handle_events_skips_silent_events() {
        let mut audio = AudioManager::new(Recorder::default());
        let played = audio.handle_events(&[
            GameEvent::Shot,
            GameEvent::BossSpawned { level: 1 },
            GameEvent::PowerUpCollected(PowerUpKind::Rapid),
        ]);
        assert_eq!(played, 2);
        let effects: Vec<_> = audio.backend().0.iter().map(|(e, _)| *e).collect();
        assert_eq!(effects, vec![SoundEffect::Shoot, SoundEffect::PowerUp]);
    }
}
