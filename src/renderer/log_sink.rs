//! Headless render sink that reports frames to the log

use std::collections::BTreeMap;

use super::{DrawCommand, RenderSink};
use crate::sim::HudStats;

/// Counts what each frame would draw and traces a one-line summary on present
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    counts: BTreeMap<&'static str, usize>,
    last_hud: Option<HudStats>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// HUD of the most recent frame
    pub fn last_hud(&self) -> Option<&HudStats> {
        self.last_hud.as_ref()
    }
}

impl RenderSink for LogRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        *self.counts.entry(command.kind_name()).or_default() += 1;
        if let DrawCommand::Hud(hud) = command {
            self.last_hud = Some(*hud);
        }
    }

    fn present(&mut self) {
        self.frames += 1;
        if log::log_enabled!(log::Level::Trace) {
            let summary = self
                .counts
                .iter()
                .map(|(kind, n)| format!("{kind}={n}"))
                .collect::<Vec<_>>()
                .join(" ");
            log::trace!("frame {}: {}", self.frames, summary);
        }
        self.counts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::build_frame;
    use crate::sim::GameState;

    #[test]
    fn test_log_renderer_tracks_frames_and_hud() {
        let mut state = GameState::new(2, 0);
        state.score = 120;
        let mut renderer = LogRenderer::new();
        assert!(renderer.last_hud().is_none());

        for command in build_frame(&state, 0) {
            renderer.draw(&command);
        }
        renderer.present();

        assert_eq!(renderer.frames(), 1);
        assert_eq!(renderer.last_hud().map(|h| h.score), Some(120));
        assert!(renderer.counts.is_empty());
    }
}
