//! Headless launcher
//!
//! Runs the game at 60 frames per second with the log standing in for the
//! screen and speakers. Usage: `space-adventure [settings.json]`

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use space_adventure::audio::{AudioManager, LogAudio};
use space_adventure::consts::SIM_DT_MS;
use space_adventure::platform::{Autopilot, Clock, InputSource, SystemClock, time_seed};
use space_adventure::renderer::LogRenderer;
use space_adventure::settings::DEFAULT_SETTINGS_FILE;
use space_adventure::sim::TickInput;
use space_adventure::{FrameOutcome, Game, Settings, SettingsError};

fn main() -> Result<(), SettingsError> {
    env_logger::init();
    log::info!("Space Adventure (headless) starting...");

    // An explicit path must load; the default file is optional
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::load_or_default(Path::new(DEFAULT_SETTINGS_FILE)),
    };

    let seed = settings.seed.unwrap_or_else(time_seed);
    let clock = SystemClock::new();
    let mut game = Game::with_config(seed, clock.now_ms(), settings.sim_config());

    let mut renderer = LogRenderer::new();
    let mut audio = AudioManager::new(LogAudio);
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut input: Box<dyn InputSource> = if settings.autopilot {
        Box::new(Autopilot)
    } else {
        log::warn!("No input device in headless mode - the ship will idle");
        Box::new(TickInput::default)
    };

    let frame_budget = Duration::from_secs_f64(SIM_DT_MS / 1000.0);
    loop {
        let started = Instant::now();
        if game.step(&clock, input.as_mut(), &mut renderer, &mut audio) == FrameOutcome::Quit {
            break;
        }

        let frames = game.frames();
        if settings.hud_log_interval > 0 && frames % settings.hud_log_interval == 0 {
            if let Some(hud) = renderer.last_hud() {
                log::info!(
                    "frame {}: score {} level {} lives {} health {} shield {}{}",
                    frames,
                    hud.score,
                    hud.level,
                    hud.lives,
                    hud.health,
                    hud.shield,
                    if hud.boss_health_fraction.is_some() { " [boss]" } else { "" }
                );
            }
        }

        if settings.max_frames > 0 && frames >= settings.max_frames {
            log::info!("Reached {} frames, stopping", frames);
            break;
        }

        if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    let stats = game.state().hud();
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final stats: {e}"),
    }
    Ok(())
}
