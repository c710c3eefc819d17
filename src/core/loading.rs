//! Busy indicator driven by an in-flight request counter.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    in_flight: usize,
    pulse_start: Instant,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self {
            in_flight: 0,
            pulse_start: Instant::now(),
        }
    }
}

impl LoadingIndicator {
    pub fn begin(&mut self) {
        if self.in_flight == 0 {
            self.pulse_start = Instant::now();
        }
        self.in_flight += 1;
    }

    /// Mark one request finished. Extra calls at zero are ignored.
    pub fn end(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Spinner glyph for the current animation phase.
    pub fn frame(&self) -> char {
        const FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];
        let elapsed = self.pulse_start.elapsed().as_millis() / 150;
        FRAMES[(elapsed % FRAMES.len() as u128) as usize]
    }
}
