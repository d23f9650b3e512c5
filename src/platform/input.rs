//! Input sources

use crate::sim::TickInput;

/// Non-blocking snapshot of the held controls
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

impl<F: FnMut() -> TickInput> InputSource for F {
    fn poll(&mut self) -> TickInput {
        self()
    }
}

/// Hands control to the simulation's idle/demo AI
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        TickInput {
            idle_mode: true,
            // Jump straight back in after a game over
            restart: true,
            ..Default::default()
        }
    }
}
