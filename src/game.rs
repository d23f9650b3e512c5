//! Frame loop orchestrator
//!
//! Owns the `GameState` and drives it from wall-clock frames: the elapsed
//! time feeds an accumulator that is drained in fixed 60 Hz simulation steps,
//! then the frame's events go to audio and a fresh snapshot goes to the renderer.

use crate::audio::{AudioBackend, AudioManager};
use crate::consts::*;
use crate::platform::{Clock, InputSource};
use crate::renderer::{RenderSink, build_frame};
use crate::sim::{GameState, SimConfig, TickInput, tick};

/// What the caller should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Quit,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: GameState,
    accumulator: f64,
    last_frame_ms: Option<u64>,
    /// Simulation clock, advanced by exactly one step per tick
    sim_time_ms: f64,
    frames: u64,
}

impl Game {
    pub fn new(seed: u64, now_ms: u64) -> Self {
        Self::with_config(seed, now_ms, SimConfig::default())
    }

    pub fn with_config(seed: u64, now_ms: u64, config: SimConfig) -> Self {
        log::info!("Game initialized with seed: {}", seed);
        Self {
            state: GameState::with_config(seed, now_ms, config),
            accumulator: 0.0,
            last_frame_ms: None,
            sim_time_ms: now_ms as f64,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Frames completed so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current simulation timestamp
    pub fn sim_time_ms(&self) -> u64 {
        self.sim_time_ms as u64
    }

    /// Run simulation ticks owed for a frame at wall time `now_ms`.
    /// Returns the number of substeps taken.
    pub fn update(&mut self, input: &TickInput, now_ms: u64) -> u32 {
        let gap = match self.last_frame_ms {
            Some(last) => now_ms.saturating_sub(last) as f64,
            None => SIM_DT_MS,
        };
        self.last_frame_ms = Some(now_ms);
        self.accumulator += gap.min(MAX_FRAME_GAP_MS);

        let mut input = *input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.sim_time_ms += SIM_DT_MS;
            let now = self.sim_time_ms();
            tick(&mut self.state, &input, now);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.restart = false;
        }
        substeps
    }

    /// One full frame: simulate, play cues, draw
    pub fn frame<R: RenderSink, B: AudioBackend>(
        &mut self,
        input: &TickInput,
        now_ms: u64,
        renderer: &mut R,
        audio: &mut AudioManager<B>,
    ) -> FrameOutcome {
        if input.quit {
            log::info!(
                "Quit after {} frames (score {}, level {})",
                self.frames,
                self.state.score,
                self.state.level
            );
            return FrameOutcome::Quit;
        }

        self.update(input, now_ms);

        let events = self.state.drain_events();
        audio.handle_events(&events);

        for command in build_frame(&self.state, self.sim_time_ms()) {
            renderer.draw(&command);
        }
        renderer.present();

        self.frames += 1;
        FrameOutcome::Continue
    }

    /// Poll `input` and run one frame at the clock's current time
    pub fn step<C, I, R, B>(
        &mut self,
        clock: &C,
        input: &mut I,
        renderer: &mut R,
        audio: &mut AudioManager<B>,
    ) -> FrameOutcome
    where
        C: Clock,
        I: InputSource + ?Sized,
        R: RenderSink,
        B: AudioBackend,
    {
        let input = input.poll();
        self.frame(&input, clock.now_ms(), renderer, audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::platform::ManualClock;
    use crate::renderer::DrawCommand;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl AudioBackend for Recorder {
        fn play(&mut self, effect: SoundEffect, _volume: f32) {
            self.0.push(effect);
        }
    }

    fn fixtures() -> (Vec<DrawCommand>, AudioManager<Recorder>) {
        (Vec::new(), AudioManager::new(Recorder::default()))
    }

    #[test]
    fn test_fixed_timestep_substeps() {
        let mut game = Game::new(1, 0);

        assert_eq!(game.update(&TickInput::default(), 0), 1);
        assert_eq!(game.update(&TickInput::default(), 110), 6);
        // Long stalls are clamped instead of replayed
        assert_eq!(game.update(&TickInput::default(), 5000), 6);
        assert_eq!(game.state().time_ticks, 13);
    }

    #[test]
    fn test_sim_time_advances_per_tick() {
        let mut game = Game::new(1, 1000);
        game.update(&TickInput::default(), 1000);
        game.update(&TickInput::default(), 1110);
        // 7 ticks of 1000/60 ms
        assert_eq!(game.sim_time_ms(), 1116);
        assert_eq!(game.state().last_tick_ms, 1116);
    }

    #[test]
    fn test_quit_stops_without_simulating() {
        let (mut sink, mut audio) = fixtures();
        let mut game = Game::new(1, 0);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(game.frame(&quit, 50, &mut sink, &mut audio), FrameOutcome::Quit);
        assert_eq!(game.frames(), 0);
        assert_eq!(game.state().time_ticks, 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_frame_dispatches_audio_and_draws() {
        let (mut sink, mut audio) = fixtures();
        let mut game = Game::new(1, 0);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        assert_eq!(game.frame(&fire, 0, &mut sink, &mut audio), FrameOutcome::Continue);
        assert_eq!(audio.backend().0, vec![SoundEffect::Shoot]);
        assert!(game.state().events.is_empty());
        assert!(matches!(sink.last(), Some(DrawCommand::Hud(_))));
        assert!(sink.iter().any(|c| matches!(c, DrawCommand::Bullet { .. })));
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn test_restart_applies_once_per_frame() {
        let (mut sink, mut audio) = fixtures();
        let mut game = Game::new(1, 0);
        game.state_mut().end_game();
        game.frame(&TickInput::default(), 0, &mut sink, &mut audio);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        game.frame(&restart, 110, &mut sink, &mut audio);
        assert_eq!(game.state().restarts, 1);
        assert!(!game.state().is_game_over());
    }

    #[test]
    fn test_step_polls_clock_and_input() {
        let (mut sink, mut audio) = fixtures();
        let clock = ManualClock::new(0);
        let mut game = Game::new(1, 0);
        let mut polls = 0;
        let mut input = || {
            polls += 1;
            TickInput {
                quit: polls > 3,
                ..Default::default()
            }
        };

        let mut outcome = FrameOutcome::Continue;
        while outcome == FrameOutcome::Continue {
            outcome = game.step(&clock, &mut input, &mut sink, &mut audio);
            clock.advance(17);
        }
        assert_eq!(game.frames(), 3);
        assert_eq!(game.state().time_ticks, 3);
    }
}
